//! # Derived View Computations
//!
//! Pure selectors over the ledger and the budget configuration. Everything
//! here is a read-time join; nothing mutates state or touches the backing
//! store, and "today" is always an explicit argument so screens and tests
//! control the clock.

use chrono::{Datelike, NaiveDate};

use crate::domain::models::budget::BudgetConfig;
use crate::domain::models::expense::ExpenseRecord;

/// Aggregated figures for the month-summary screen
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub total: f64,
    pub remaining: f64,
    /// Most recent entries of the month, date-descending
    pub recent: Vec<ExpenseRecord>,
}

/// Sum of amounts for entries falling in the given calendar month
pub fn month_total(expenses: &[ExpenseRecord], year: i32, month: u32) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .map(|e| e.amount)
        .sum()
}

/// Sum of amounts for entries falling within the configured budget period.
/// With no period configured this is 0.
pub fn period_total(expenses: &[ExpenseRecord], config: &BudgetConfig) -> f64 {
    expenses
        .iter()
        .filter(|e| config.contains(e.date.date_naive()))
        .map(|e| e.amount)
        .sum()
}

/// Remaining budget, floored at zero so overspending never shows negative
pub fn remaining_budget(amount: f64, spent: f64) -> f64 {
    (amount - spent).max(0.0)
}

/// The `n` most recent entries, date-descending. Ties keep ledger order.
pub fn recent(expenses: &[ExpenseRecord], n: usize) -> Vec<ExpenseRecord> {
    let mut sorted: Vec<ExpenseRecord> = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Per-category totals for the given calendar month, descending by amount.
/// Entries with an empty category are grouped under the default label.
pub fn category_totals(expenses: &[ExpenseRecord], year: i32, month: u32) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for expense in expenses
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
    {
        let category = expense.display_category().to_string();
        match totals.iter_mut().find(|(name, _)| *name == category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((category, expense.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

/// Month-by-month totals for the chart: the `n` months ending at the month of
/// `end`, oldest first, one `(year, month, total)` triple per month
pub fn monthly_series(expenses: &[ExpenseRecord], end: NaiveDate, n: u32) -> Vec<(i32, u32, f64)> {
    let mut months = Vec::new();
    let mut year = end.year();
    let mut month = end.month();
    for _ in 0..n {
        months.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();

    months
        .into_iter()
        .map(|(y, m)| (y, m, month_total(expenses, y, m)))
        .collect()
}

/// Summary for the calendar month containing `today`, judged against the
/// configured budget amount
pub fn month_summary(
    expenses: &[ExpenseRecord],
    config: &BudgetConfig,
    today: NaiveDate,
    recent_limit: usize,
) -> MonthSummary {
    let month_items: Vec<ExpenseRecord> = expenses
        .iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .cloned()
        .collect();
    let total: f64 = month_items.iter().map(|e| e.amount).sum();
    MonthSummary {
        total,
        remaining: remaining_budget(config.monthly_amount, total),
        recent: recent(&month_items, recent_limit),
    }
}
