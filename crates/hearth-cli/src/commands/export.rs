//! Export command implementation

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::db::Database;
use hearth_core::export::export_records_csv;

/// Export all records as CSV to a file, or to stdout when no path is given
pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let count = export_records_csv(db, BufWriter::new(file))?;
            println!("✅ Exported {} records to {}", count, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            export_records_csv(db, stdout.lock())?;
        }
    }
    Ok(())
}
