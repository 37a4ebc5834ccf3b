//! Reading the creator column out of the input CSV.

use std::path::{Path, PathBuf};

/// Failures reading the input file. All of them end the run before any
/// remote work starts.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InputError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read input file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input file {} has no '{column}' column (found: {found})", .path.display())]
    MissingColumn {
        path: PathBuf,
        column: String,
        found: String,
    },
}

/// Returns every value of `column` in file order, blanks included.
///
/// A UTF-8 byte-order mark before the first header is ignored. Rows shorter
/// than the header contribute an empty value.
pub(crate) fn read_identity_column(path: &Path, column: &str) -> Result<Vec<String>, InputError> {
    if !path.is_file() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_owned())
        .collect();

    let Some(idx) = headers.iter().position(|h| h == column) else {
        return Err(InputError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_owned(),
            found: headers.join(", "),
        });
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        values.push(record.get(idx).unwrap_or_default().to_owned());
    }

    tracing::info!(path = %path.display(), column, rows = values.len(), "read input");
    Ok(values)
}
