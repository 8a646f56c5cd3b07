//! Ledger snapshot
//!
//! Gathers the monthly breakdown, the all-time category breakdown and the
//! most recent records into one serializable value. The advisor hands its
//! JSON rendering to the chat model as context.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::models::{CategoryTotal, MonthlyBreakdown, Record};

/// Number of recent records included when no limit is given
pub const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Point-in-time view of the ledger for the chat model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub monthly: Vec<MonthlyBreakdown>,
    pub categories: Vec<CategoryTotal>,
    pub recent: Vec<Record>,
}

impl LedgerSnapshot {
    /// Pretty JSON rendering sent as a system message
    pub fn to_prompt_text(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.recent.is_empty()
    }
}

/// Builds a `LedgerSnapshot` from the store
pub struct SnapshotBuilder<'a> {
    db: &'a Database,
    recent_limit: i64,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Number of recent records to include (negative means none)
    pub fn with_recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn build(&self) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            monthly: self.db.get_monthly_breakdown()?,
            categories: self.db.get_category_breakdown(None)?,
            recent: self.db.list_recent_records(self.recent_limit)?,
        };

        debug!(
            months = snapshot.monthly.len(),
            categories = snapshot.categories.len(),
            recent = snapshot.recent.len(),
            "Built ledger snapshot"
        );
        Ok(snapshot)
    }
}
