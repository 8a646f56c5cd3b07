//! Hearth Core Library
//!
//! Shared functionality for the Hearth household ledger:
//! - SQLite ledger store with connection pooling
//! - Aggregation reports (totals, monthly, yearly, per category)
//! - Ledger snapshot and chat advisor over an OpenAI-compatible API
//! - Prompt library with user overrides
//! - Configuration loading and CSV export

pub mod advisor;
pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod prompts;
pub mod snapshot;

/// Test utilities including a mock chat completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{AdvisorReply, LedgerAdvisor};
pub use ai::{AIClient, ChatBackend, ChatMessage, ChatRole, MockBackend, OpenAICompatibleBackend};
pub use config::{ChatConfig, Config, DatabaseConfig, ServerSettings};
pub use db::Database;
pub use error::{Error, Result};
pub use export::export_records_csv;
pub use models::{
    CategoryTotal, CurrentMonthExpense, IncomeExpenseTotals, MonthlyBreakdown, NewRecord, Record,
    RecordKind, RecordSummary, YearlyBreakdown,
};
pub use prompts::{Prompt, PromptId, PromptLibrary};
pub use snapshot::{LedgerSnapshot, SnapshotBuilder};
