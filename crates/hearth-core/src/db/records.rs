//! Ledger store operations

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{Database, KNOWN_KINDS};
use crate::error::Result;
use crate::models::{NewRecord, Record, RecordKind, RecordSummary};

const RECORD_COLUMNS: &str = "id, date, kind, title, amount, category";

/// Read column `idx` as a `RecordKind`, failing on anything else
fn kind_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<RecordKind> {
    let kind: String = row.get(idx)?;
    kind.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
    })
}

/// Map a `RECORD_COLUMNS` row to a `Record`
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        date: row.get(1)?,
        kind: kind_at(row, 2)?,
        title: row.get(3)?,
        amount: row.get(4)?,
        category: row.get(5)?,
    })
}

impl Database {
    /// Append a record and return its new id
    ///
    /// Fields are stored as given; validation belongs to the caller.
    pub fn insert_record(&self, record: &NewRecord) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO records (date, kind, title, amount, category) VALUES (?, ?, ?, ?, ?)",
            params![
                record.date,
                record.kind.as_str(),
                record.title,
                record.amount,
                record.category,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(id, date = %record.date, kind = %record.kind, amount = record.amount, "Inserted record");
        Ok(id)
    }

    /// Delete a record by id
    ///
    /// Deleting an id that does not exist is not an error. Returns whether a
    /// row was actually removed, for callers that want to report it.
    pub fn delete_record(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM records WHERE id = ?", params![id])?;

        if removed > 0 {
            info!(id, "Deleted record");
        } else {
            debug!(id, "Delete of absent record ignored");
        }
        Ok(removed > 0)
    }

    /// Get a single record by id
    pub fn get_record(&self, id: i64) -> Result<Option<Record>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM records WHERE id = ? AND {}",
                    RECORD_COLUMNS, KNOWN_KINDS
                ),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// All records whose date equals `date` exactly
    pub fn find_records_by_date(&self, date: &str) -> Result<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records WHERE date = ? AND {} ORDER BY id",
            RECORD_COLUMNS, KNOWN_KINDS
        ))?;

        let records = stmt
            .query_map(params![date], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Full scan projected to date/kind/amount, in storage order
    pub fn list_all_records(&self) -> Result<Vec<RecordSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT date, kind, amount FROM records WHERE {}",
            KNOWN_KINDS
        ))?;

        let records = stmt
            .query_map([], |row| {
                Ok(RecordSummary {
                    date: row.get(0)?,
                    kind: kind_at(row, 1)?,
                    amount: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Up to `limit` records, newest date first
    ///
    /// Same-day records come most recently inserted first.
    pub fn list_recent_records(&self, limit: i64) -> Result<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records WHERE {} ORDER BY date DESC, id DESC LIMIT ?",
            RECORD_COLUMNS, KNOWN_KINDS
        ))?;

        let records = stmt
            .query_map(params![limit.max(0)], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Every record in id order (used by export)
    pub fn list_records(&self) -> Result<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records WHERE {} ORDER BY id",
            RECORD_COLUMNS, KNOWN_KINDS
        ))?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Number of stored records
    pub fn count_records(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count)
    }
}
