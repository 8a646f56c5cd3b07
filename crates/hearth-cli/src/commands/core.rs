//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use anyhow::{Context, Result};
use hearth_core::config::Config;
use hearth_core::db::Database;

/// Open the database named by the configuration
pub fn open_db(config: &Config) -> Result<Database> {
    Database::from_config(&config.database).with_context(|| {
        format!(
            "Failed to open database at {}",
            config.database.path.display()
        )
    })
}

pub fn cmd_init(config: &Config) -> Result<()> {
    println!(
        "🔧 Initializing database at {}...",
        config.database.path.display()
    );

    let db = open_db(config)?;
    let count = db.count_records().context("Failed to read records")?;
    if count > 0 {
        println!("   Existing records kept: {}", count);
    }

    if config.chat.is_enabled() {
        println!("   🤖 Chat: {}", config.chat.model);
    } else {
        println!("   💡 Tip: Set HEARTH_CHAT_HOST to enable `hearth ask`");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a record: hearth add -k expense -t Groceries -a 4500 -c food");
    println!("  2. Start web UI: hearth serve");

    Ok(())
}
