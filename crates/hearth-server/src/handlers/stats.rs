//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::{AppError, AppState};
use hearth_core::models::{
    parse_month, CategoryTotal, CurrentMonthExpense, IncomeExpenseTotals, MonthlyBreakdown,
    YearlyBreakdown,
};

/// Query parameters for the category report
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Limit to one month (YYYY-MM)
    pub month: Option<String>,
}

/// GET /api/summary - Lifetime income and expense totals
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IncomeExpenseTotals>, AppError> {
    let totals = state.db.get_totals()?;
    Ok(Json(totals))
}

/// GET /api/stats/monthly - Income, expense and profit per month
pub async fn get_monthly_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthlyBreakdown>>, AppError> {
    let months = state.db.get_monthly_breakdown()?;
    Ok(Json(months))
}

/// GET /api/stats/yearly - Income and expense per year
pub async fn get_yearly_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<YearlyBreakdown>>, AppError> {
    let years = state.db.get_yearly_breakdown()?;
    Ok(Json(years))
}

/// GET /api/stats/category - Expense totals per category
pub async fn get_category_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    let month = match params.month.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => Some(parse_month(m).map_err(AppError::from_core)?),
        _ => None,
    };

    let categories = state.db.get_category_breakdown(month.as_deref())?;
    Ok(Json(categories))
}

/// GET /api/stats/current-month - Expense so far this month
pub async fn get_current_month_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentMonthExpense>, AppError> {
    let today = Local::now().date_naive();
    let current = state.db.get_current_month_expense(today)?;
    Ok(Json(current))
}
