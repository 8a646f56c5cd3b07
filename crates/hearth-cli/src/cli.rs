//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hearth_core::models::RecordKind;

/// Hearth - Household income and expense ledger
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Self-hosted household ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ~/.config/hearth/hearth.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path (overrides config and HEARTH_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Add an income or expense record
    Add {
        /// income or expense
        #[arg(short, long)]
        kind: RecordKind,

        /// Short description
        #[arg(short, long)]
        title: String,

        /// Amount (whole units, not negative)
        #[arg(short, long)]
        amount: i64,

        /// Category (expenses without one are reported as "Other")
        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a record by id
    Delete {
        /// Record id
        id: i64,
    },

    /// Show the records of one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Show the most recent records
    Recent {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Show lifetime income and expense totals
    Summary,

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Ask the chat model a question about the ledger
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Export all records as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (default: from config, 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: from config, 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Directory containing the front-end to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and profit per month
    Monthly,

    /// Income and expense per year
    Yearly,

    /// Expense totals per category
    Category {
        /// Limit to one month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },

    /// Expense so far this month
    CurrentMonth,
}
