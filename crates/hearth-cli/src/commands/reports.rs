//! Report command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hearth_core::db::Database;
use hearth_core::models::parse_month;

use super::{print_json, truncate};

pub fn cmd_summary(db: &Database, json: bool) -> Result<()> {
    let totals = db.get_totals()?;
    if json {
        return print_json(&totals);
    }

    println!();
    println!("💰 Ledger Summary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:  {:>12}", totals.income);
    println!("   Expense: {:>12}", totals.expense);
    println!("   Balance: {:>12}", totals.income - totals.expense);
    Ok(())
}

pub fn cmd_report_monthly(db: &Database, json: bool) -> Result<()> {
    let months = db.get_monthly_breakdown()?;
    if json {
        return print_json(&months);
    }

    println!();
    println!("📈 Monthly Breakdown");
    println!("   ─────────────────────────────────────────────────────────────");
    if months.is_empty() {
        println!("   No records yet.");
        return Ok(());
    }

    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expense", "Profit"
    );
    println!("   ─────────┼──────────────┼──────────────┼──────────────");
    for m in &months {
        println!(
            "   {:8} │ {:>12} │ {:>12} │ {:>12}",
            m.month, m.income, m.expense, m.profit
        );
    }
    Ok(())
}

pub fn cmd_report_yearly(db: &Database, json: bool) -> Result<()> {
    let years = db.get_yearly_breakdown()?;
    if json {
        return print_json(&years);
    }

    println!();
    println!("📆 Yearly Breakdown");
    println!("   ─────────────────────────────────────────────────────────────");
    if years.is_empty() {
        println!("   No records yet.");
        return Ok(());
    }

    println!("   {:6} │ {:>12} │ {:>12}", "Year", "Income", "Expense");
    println!("   ───────┼──────────────┼──────────────");
    for y in &years {
        println!("   {:6} │ {:>12} │ {:>12}", y.year, y.income, y.expense);
    }
    Ok(())
}

pub fn cmd_report_category(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = month
        .map(|m| parse_month(m.trim()))
        .transpose()
        .context("Invalid --month (use YYYY-MM)")?;

    let categories = db.get_category_breakdown(month.as_deref())?;
    if json {
        return print_json(&categories);
    }

    println!();
    println!("📊 Spending by Category");
    println!("   Period: {}", month.as_deref().unwrap_or("all time"));
    println!("   ─────────────────────────────────────────────────────────────");
    if categories.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    let total: i64 = categories.iter().map(|c| c.total).sum();
    println!("   Total: {}", total);
    println!();
    println!("   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼──────────────┼────────");
    for c in &categories {
        let pct = if total > 0 {
            c.total as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        println!(
            "   {:25} │ {:>12} │ {:>5.1}%",
            truncate(&c.category, 25),
            c.total,
            pct
        );
    }
    Ok(())
}

pub fn cmd_report_current_month(db: &Database, today: NaiveDate, json: bool) -> Result<()> {
    let current = db.get_current_month_expense(today)?;
    if json {
        return print_json(&current);
    }

    println!();
    println!("🧾 Spending in {}: {}", current.month, current.total);
    Ok(())
}
