//! Record command implementations

use anyhow::{Context, Result};
use chrono::Local;
use hearth_core::db::Database;
use hearth_core::models::{parse_record_date, NewRecord, Record, RecordKind};

use super::{print_json, truncate};

/// Add a record, defaulting the date to today. Returns the new id.
pub fn cmd_add(
    db: &Database,
    date: Option<&str>,
    kind: RecordKind,
    title: &str,
    amount: i64,
    category: Option<&str>,
) -> Result<i64> {
    let date = match date {
        Some(d) => d.trim().to_string(),
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let mut record = NewRecord::new(&date, kind, title, amount);
    if let Some(c) = category {
        record = record.with_category(c);
    }
    let record = record.normalize();
    record.validate().context("Invalid record")?;

    let id = db.insert_record(&record).context("Failed to add record")?;
    println!("✅ Added {} #{}: {} {} on {}", kind, id, title, amount, date);
    Ok(id)
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    if db.delete_record(id).context("Failed to delete record")? {
        println!("🗑️  Deleted record #{}", id);
    } else {
        println!("   Record #{} not found (nothing to delete)", id);
    }
    Ok(())
}

pub fn cmd_day(db: &Database, date: &str, json: bool) -> Result<()> {
    let date = date.trim();
    parse_record_date(date).context("Invalid date")?;

    let records = db.find_records_by_date(date)?;
    if json {
        return print_json(&records);
    }

    println!();
    println!("📅 Records on {}", date);
    print_records(&records);
    Ok(())
}

pub fn cmd_recent(db: &Database, limit: i64, json: bool) -> Result<()> {
    let records = db.list_recent_records(limit.max(1))?;
    if json {
        return print_json(&records);
    }

    println!();
    println!("🕒 Recent records");
    print_records(&records);
    Ok(())
}

fn print_records(records: &[Record]) {
    println!("   ─────────────────────────────────────────────────────────────");
    if records.is_empty() {
        println!("   No records found.");
        return;
    }

    println!(
        "   {:>5} │ {:10} │ {:7} │ {:20} │ {:>10} │ {}",
        "ID", "Date", "Kind", "Title", "Amount", "Category"
    );
    println!("   ──────┼────────────┼─────────┼──────────────────────┼────────────┼──────────");
    for r in records {
        println!(
            "   {:>5} │ {:10} │ {:7} │ {:20} │ {:>10} │ {}",
            r.id,
            r.date,
            r.kind,
            truncate(&r.title, 20),
            r.amount,
            r.category.as_deref().unwrap_or("")
        );
    }
}
