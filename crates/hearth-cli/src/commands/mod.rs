//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db)
//! - `records` - Record entry and lookups (add, delete, day, recent)
//! - `reports` - Summary and report output
//! - `ask` - Chat advisor
//! - `export` - CSV export
//! - `serve` - Web server command

pub mod ask;
pub mod core;
pub mod export;
pub mod records;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use ask::*;
pub use core::*;
pub use export::*;
pub use records::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum display width
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
