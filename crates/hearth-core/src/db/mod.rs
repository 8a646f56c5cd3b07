//! Database access layer with connection pooling and schema setup
//!
//! This module is organized by concern:
//! - `records` - Ledger store (insert, delete, lookups, scans)
//! - `stats` - Aggregation queries (totals, monthly/yearly, categories)
//!
//! Every public operation checks out one pooled connection and drops it
//! before returning; nothing holds a handle across requests.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;

mod records;
mod stats;


/// Row filter applied by every read and report
///
/// Other kinds can only arrive through direct SQL. Such rows stay in the
/// table but are never listed, relabeled or counted.
const KNOWN_KINDS: &str = "kind IN ('income', 'expense')";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the ledger database at `path`
    ///
    /// Runs schema creation, which is a no-op on an existing database.
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.init_schema()?;

        info!(path = %path, "Opened ledger database");
        Ok(db)
    }

    /// Open the database named by the configuration
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::open(&config.path)
    }

    /// Open a database from a filesystem path, creating its parent directory
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(&path.to_string_lossy())
    }

    /// Create an isolated throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "hearth_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::open(&path)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Create the schema if absent
    ///
    /// Safe to call any number of times; existing records are untouched.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Ledger records
            -- AUTOINCREMENT so deleted ids are never handed out again
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                title TEXT NOT NULL,
                amount INTEGER NOT NULL,
                category TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
            "#,
        )?;

        migrate_legacy_kind_column(&conn)?;

        Ok(())
    }
}

/// Rename the `type` column of older ledger files to `kind`
///
/// Ledgers written before the rename have `records.type` and no `kind`, and
/// `CREATE TABLE IF NOT EXISTS` leaves such a table alone.
fn migrate_legacy_kind_column(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('records')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let has = |name: &str| columns.iter().any(|c| c == name);
    if has("type") && !has("kind") {
        conn.execute_batch("ALTER TABLE records RENAME COLUMN type TO kind;")?;
        info!("Migrated legacy records.type column to records.kind");
    }

    Ok(())
}
