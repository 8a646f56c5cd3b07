//! Ledger statistics
//!
//! Every report is recomputed from the `records` table on each call. Month and
//! year keys are textual prefixes of the stored date, so a malformed date
//! lands in its own odd-looking group instead of failing the query.
//!
//! If data volumes ever outgrow this, the extension point is an aggregate
//! cache keyed by month/year/category and invalidated from `insert_record`
//! and `delete_record`.

use chrono::NaiveDate;
use rusqlite::{params, Row};

use super::{Database, KNOWN_KINDS};
use crate::error::Result;
use crate::models::{
    month_key, CategoryTotal, CurrentMonthExpense, IncomeExpenseTotals, MonthlyBreakdown,
    YearlyBreakdown, UNCATEGORIZED,
};

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<CategoryTotal> {
    Ok(CategoryTotal {
        category: row.get(0)?,
        total: row.get(1)?,
    })
}

impl Database {
    /// Lifetime income and expense sums (0 when a kind has no records)
    pub fn get_totals(&self) -> Result<IncomeExpenseTotals> {
        let conn = self.conn()?;

        let (income, expense) = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0)
            FROM records
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(IncomeExpenseTotals { income, expense })
    }

    /// Income, expense and profit per `YYYY-MM`, oldest month first
    pub fn get_monthly_breakdown(&self) -> Result<Vec<MonthlyBreakdown>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT
                substr(date, 1, 7) AS month,
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0)
            FROM records
            WHERE {}
            GROUP BY month
            ORDER BY month ASC
            "#,
            KNOWN_KINDS
        ))?;

        let months = stmt
            .query_map([], |row| {
                let income: i64 = row.get(1)?;
                let expense: i64 = row.get(2)?;
                Ok(MonthlyBreakdown {
                    month: row.get(0)?,
                    income,
                    expense,
                    profit: income - expense,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(months)
    }

    /// Income and expense per `YYYY`, oldest year first
    pub fn get_yearly_breakdown(&self) -> Result<Vec<YearlyBreakdown>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT
                substr(date, 1, 4) AS year,
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0)
            FROM records
            WHERE {}
            GROUP BY year
            ORDER BY year ASC
            "#,
            KNOWN_KINDS
        ))?;

        let years = stmt
            .query_map([], |row| {
                Ok(YearlyBreakdown {
                    year: row.get(0)?,
                    income: row.get(1)?,
                    expense: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(years)
    }

    /// Expense totals per category, optionally limited to one `YYYY-MM`
    ///
    /// Missing and empty categories are reported together as "Other".
    /// Largest total first; ties by category name.
    pub fn get_category_breakdown(&self, month: Option<&str>) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;

        let month_clause = if month.is_some() {
            "AND substr(date, 1, 7) = ?1"
        } else {
            ""
        };
        let sql = format!(
            r#"
            SELECT
                COALESCE(NULLIF(category, ''), '{}') AS bucket,
                SUM(amount) AS total
            FROM records
            WHERE kind = 'expense' {}
            GROUP BY bucket
            ORDER BY total DESC, bucket ASC
            "#,
            UNCATEGORIZED, month_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let categories = match month {
            Some(m) => stmt
                .query_map(params![m], category_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], category_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?,
        };

        Ok(categories)
    }

    /// Total expense for the month containing `today`
    ///
    /// The caller supplies the date so the report does not read the clock.
    pub fn get_current_month_expense(&self, today: NaiveDate) -> Result<CurrentMonthExpense> {
        let month = month_key(today);
        let conn = self.conn()?;

        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM records WHERE kind = 'expense' AND substr(date, 1, 7) = ?",
            params![month],
            |row| row.get(0),
        )?;

        Ok(CurrentMonthExpense { month, total })
    }
}
