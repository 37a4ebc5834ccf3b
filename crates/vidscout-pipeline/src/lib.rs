//! Turns the flat list of collected dataset items into one spreadsheet row
//! per requested creator, and writes the result as a workbook or CSV.

pub mod aggregate;
pub mod contact;
pub mod error;
pub mod merge;
pub mod output;
pub mod record;
pub mod table;

pub use aggregate::{aggregate, Aggregates};
pub use contact::extract_contact;
pub use error::PipelineError;
pub use merge::merge;
pub use output::{
    column_order, select_columns, write_csv, write_csv_file, write_table_file, write_xlsx_file,
};
pub use record::{Field, RawRecord};
pub use table::{Column, Table, SENTINEL};

use vidscout_core::Identity;

/// Aggregates `items`, joins them onto `identities`, and orders the columns
/// for output. `cap` is the per-creator item cap and media column count.
#[must_use]
pub fn build_output(identities: &[Identity], items: Vec<serde_json::Value>, cap: usize) -> Table {
    let records: Vec<RawRecord> = items.into_iter().map(RawRecord::new).collect();
    let aggregates = aggregate(records, cap);
    tracing::info!(
        creators = aggregates.profiles.as_ref().map_or(0, std::collections::HashMap::len),
        has_stats = aggregates.stats.is_some(),
        media_columns = aggregates.media_width(),
        "aggregated collected items"
    );
    let merged = merge(identities, &aggregates);
    select_columns(&merged, cap)
}
