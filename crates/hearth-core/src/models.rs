//! Domain models for Hearth

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category label used when a record has no category
pub const UNCATEGORIZED: &str = "Other";

/// Whether a record brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown record kind: {} (use income or expense)", s)),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// `YYYY-MM-DD`, kept as stored text
    pub date: String,
    pub kind: RecordKind,
    pub title: String,
    /// Minor currency units, never negative; direction comes from `kind`
    pub amount: i64,
    pub category: Option<String>,
}

/// Payload for inserting a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub date: String,
    /// The HTML entry form posts this field as `type`
    #[serde(alias = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub amount: i64,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewRecord {
    pub fn new(date: &str, kind: RecordKind, title: &str, amount: i64) -> Self {
        Self {
            date: date.to_string(),
            kind,
            title: title.to_string(),
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Trim the date and category, dropping a category that is blank
    ///
    /// Every entry surface calls this so a whitespace-only category lands
    /// in the "Other" bucket instead of a bucket of its own.
    pub fn normalize(mut self) -> Self {
        self.date = self.date.trim().to_string();
        self.category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);
        self
    }

    /// Check the fields the store itself does not enforce
    ///
    /// The store accepts any values; the HTTP and CLI surfaces call this
    /// before inserting.
    pub fn validate(&self) -> Result<()> {
        parse_record_date(&self.date)?;
        if self.amount < 0 {
            return Err(Error::InvalidData(format!(
                "Amount must not be negative: {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Date/kind/amount projection used for calendar views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub date: String,
    pub kind: RecordKind,
    pub amount: i64,
}

/// Lifetime income and expense sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeExpenseTotals {
    pub income: i64,
    pub expense: i64,
}

/// Income/expense rollup for one `YYYY-MM` month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub month: String,
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
}

/// Income/expense rollup for one `YYYY` year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    pub year: String,
    pub income: i64,
    pub expense: i64,
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Expense total for the current calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentMonthExpense {
    pub month: String,
    pub total: i64,
}

/// Parse a record date in `YYYY-MM-DD` form
///
/// Month and year grouping slice the stored text, so the zero-padded
/// ten-character width is required, not just a parseable date.
pub fn parse_record_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|_| s.len() == 10)
        .ok_or_else(|| Error::InvalidData(format!("Invalid date (use YYYY-MM-DD): {}", s)))
}

/// Validate a month filter in `YYYY-MM` form, returning it trimmed
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    // chrono needs a day to parse, so borrow the first of the month
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .ok()
        .filter(|_| s.len() == 7)
        .map(|_| s.to_string())
        .ok_or_else(|| Error::InvalidData(format!("Invalid month (use YYYY-MM): {}", s)))
}

/// `YYYY-MM` key for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_round_trip_str() {
        assert_eq!("income".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!(" EXPENSE ".parse::<RecordKind>().unwrap(), RecordKind::Expense);
        assert!("transfer".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::Expense.to_string(), "expense");
    }

    #[test]
    fn test_new_record_accepts_legacy_type_field() {
        let json = r#"{"date":"2024-01-05","type":"income","title":"Salary","amount":1000}"#;
        let record: NewRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, RecordKind::Income);
        assert!(record.category.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_date_and_negative_amount() {
        let ok = NewRecord::new("2024-02-29", RecordKind::Expense, "Lunch", 12);
        assert!(ok.validate().is_ok());

        let bad_date = NewRecord::new("2024-2-3", RecordKind::Expense, "Lunch", 12);
        assert!(bad_date.validate().is_err());

        let not_a_date = NewRecord::new("2023-02-29", RecordKind::Expense, "Lunch", 12);
        assert!(not_a_date.validate().is_err());

        let negative = NewRecord::new("2024-01-01", RecordKind::Expense, "Refund", -5);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_normalize_trims_and_drops_blank_category() {
        let record = NewRecord::new(" 2024-01-05 ", RecordKind::Expense, "Bus", 3)
            .with_category("  transport ")
            .normalize();
        assert_eq!(record.date, "2024-01-05");
        assert_eq!(record.category.as_deref(), Some("transport"));

        let blank = NewRecord::new("2024-01-05", RecordKind::Expense, "Bus", 3)
            .with_category("   ")
            .normalize();
        assert!(blank.category.is_none());

        let none = NewRecord::new("2024-01-05", RecordKind::Expense, "Bus", 3).normalize();
        assert!(none.category.is_none());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), "2024-03");
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-3").is_err());
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn test_month_key() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(month_key(date), "2024-07");
    }
}
