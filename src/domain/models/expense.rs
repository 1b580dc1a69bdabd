//! Domain model for an expense ledger entry.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Category label used when an entry carries none.
///
/// Categories are an open set of display strings ("식사", "음료", "간식", ...);
/// nothing in the data model enforces membership.
pub const DEFAULT_CATEGORY: &str = "기타";

/// A single expense entry in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Spent amount; non-negative by convention (callers validate input)
    pub amount: f64,
    pub date: DateTime<FixedOffset>,
    /// Payment method label, e.g. "신용" or "현금"
    pub method: String,
    pub memo: String,
}

impl ExpenseRecord {
    /// Category for display, falling back to [`DEFAULT_CATEGORY`] when empty
    pub fn display_category(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }

    /// Merge non-`None` patch fields into this record
    pub fn apply_patch(&mut self, patch: &ExpensePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(method) = &patch.method {
            self.method = method.clone();
        }
        if let Some(memo) = &patch.memo {
            self.memo = memo.clone();
        }
    }
}

/// Partial update for an expense record; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<DateTime<FixedOffset>>,
    pub method: Option<String>,
    pub memo: Option<String>,
}
