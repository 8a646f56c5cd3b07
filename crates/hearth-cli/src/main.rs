//! Hearth CLI - Household ledger
//!
//! Usage:
//!   hearth init                                   Initialize database
//!   hearth add -k expense -t Lunch -a 1200        Add a record
//!   hearth report monthly                         Monthly breakdown
//!   hearth ask "Where does my money go?"          Ask the chat model
//!   hearth serve --port 3000                      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use hearth_core::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    // Defaults -> config file -> environment -> flags
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    match cli.command {
        Commands::Init => commands::cmd_init(&config),
        Commands::Add {
            kind,
            title,
            amount,
            category,
            date,
        } => {
            let db = commands::open_db(&config)?;
            commands::cmd_add(
                &db,
                date.as_deref(),
                kind,
                &title,
                amount,
                category.as_deref(),
            )
            .map(|_| ())
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&config)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Day { date } => {
            let db = commands::open_db(&config)?;
            commands::cmd_day(&db, &date, cli.json)
        }
        Commands::Recent { limit } => {
            let db = commands::open_db(&config)?;
            commands::cmd_recent(&db, limit, cli.json)
        }
        Commands::Summary => {
            let db = commands::open_db(&config)?;
            commands::cmd_summary(&db, cli.json)
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&config)?;
            match report_type {
                ReportType::Monthly => commands::cmd_report_monthly(&db, cli.json),
                ReportType::Yearly => commands::cmd_report_yearly(&db, cli.json),
                ReportType::Category { month } => {
                    commands::cmd_report_category(&db, month.as_deref(), cli.json)
                }
                ReportType::CurrentMonth => {
                    let today = chrono::Local::now().date_naive();
                    commands::cmd_report_current_month(&db, today, cli.json)
                }
            }
        }
        Commands::Ask { question } => {
            let db = commands::open_db(&config)?;
            commands::cmd_ask(&db, &config, &question.join(" "), cli.json).await
        }
        Commands::Export { output } => {
            let db = commands::open_db(&config)?;
            commands::cmd_export(&db, output.as_deref())
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(config, host, port, static_dir.as_deref()).await,
    }
}
