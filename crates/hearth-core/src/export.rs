//! CSV export of ledger records

use std::io::Write;

use tracing::info;

use crate::db::Database;
use crate::error::Result;

/// Column header written before any records
pub const CSV_HEADER: [&str; 6] = ["id", "date", "kind", "title", "amount", "category"];

/// Write every record as CSV in id order
///
/// Missing categories are written as empty cells. Returns the number of
/// records written (the header is not counted).
pub fn export_records_csv<W: Write>(db: &Database, writer: W) -> Result<usize> {
    let records = db.list_records()?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for record in &records {
        let id = record.id.to_string();
        let amount = record.amount.to_string();
        csv.write_record([
            id.as_str(),
            record.date.as_str(),
            record.kind.as_str(),
            record.title.as_str(),
            amount.as_str(),
            record.category.as_deref().unwrap_or(""),
        ])?;
    }
    csv.flush()?;

    info!(count = records.len(), "Exported records to CSV");
    Ok(records.len())
}
