//! Column ordering and serialization of the final table.
//!
//! The default output is an `.xlsx` workbook with a bold header row and
//! numeric cells for counts and medians. Paths ending in `.csv` get a
//! BOM-prefixed CSV file instead.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::PipelineError;
use crate::table::{Column, Table};

/// UTF-8 byte-order mark, so spreadsheet applications detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The fixed logical column order for a media cap of `cap`.
#[must_use]
pub fn column_order(cap: usize) -> Vec<Column> {
    let mut order = vec![
        Column::Name,
        Column::ProfileUrl,
        Column::Title,
        Column::Bio,
        Column::Followers,
        Column::PlayMedian,
        Column::CollectMedian,
        Column::LastPostDate,
        Column::Email,
    ];
    order.extend((1..=cap).map(Column::Image));
    order
}

/// Reorders `table` into [`column_order`], keeping only columns it has.
/// Columns outside the order are dropped.
#[must_use]
pub fn select_columns(table: &Table, cap: usize) -> Table {
    let picked: Vec<(Column, usize)> = column_order(cap)
        .into_iter()
        .filter_map(|column| table.column_index(column).map(|idx| (column, idx)))
        .collect();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            picked
                .iter()
                .map(|(_, idx)| row[*idx].clone())
                .collect::<Vec<String>>()
        })
        .collect();

    Table {
        columns: picked.into_iter().map(|(column, _)| column).collect(),
        rows,
    }
}

/// Writes the header row and every data row as CSV.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] if a record cannot be written.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.columns.iter().map(Column::header))?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `table` to `path`, choosing the format from the extension:
/// `.csv` (any case) writes CSV, anything else writes an `.xlsx` workbook.
///
/// # Errors
///
/// Propagates the error of [`write_csv_file`] or [`write_xlsx_file`].
pub fn write_table_file(table: &Table, path: &Path) -> Result<(), PipelineError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        write_csv_file(table, path)
    } else {
        write_xlsx_file(table, path)
    }
}

/// Writes `table` as a single-sheet workbook. Numeric columns holding a
/// number are written as number cells; everything else, including the
/// sentinel, is written as text.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the parent directory cannot be created,
/// or [`PipelineError::Xlsx`] if the table does not fit a worksheet or the
/// file cannot be saved.
pub fn write_xlsx_file(table: &Table, path: &Path) -> Result<(), PipelineError> {
    create_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col_idx, column) in table.columns.iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string_with_format(0, col, column.header(), &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = u32::try_from(row_idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col_idx, (column, cell)) in table.columns.iter().zip(row).enumerate() {
            let col = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
            let number = if column.is_numeric() {
                cell.parse::<f64>().ok()
            } else {
                None
            };
            match number {
                Some(value) => worksheet.write_number(sheet_row, col, value)?,
                None => worksheet.write_string(sheet_row, col, cell)?,
            };
        }
    }

    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = table.rows.len(), "wrote output workbook");
    Ok(())
}

/// Writes `table` to `path` as BOM-prefixed CSV, creating missing parent
/// directories.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the directory or file cannot be
/// created, or [`PipelineError::Csv`] if writing fails.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<(), PipelineError> {
    let io_err = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    create_parent_dir(path)?;

    let mut file = BufWriter::new(File::create(path).map_err(io_err)?);
    file.write_all(UTF8_BOM).map_err(io_err)?;
    write_csv(table, &mut file)?;
    file.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), rows = table.rows.len(), "wrote output");
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
