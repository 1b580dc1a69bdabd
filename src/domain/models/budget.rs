//! Domain model for the budget configuration.
//!
//! The app keeps a single budget configuration per installation; there is no
//! history of past budgets on the client. The canonical representation is an
//! amount plus an explicit start/end date range; the day-count of the period is
//! derived, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Singleton budget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Budget amount for the period; 0 means unset
    pub monthly_amount: f64,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Server-issued budget id, when the budget was mirrored remotely
    pub server_id: Option<String>,
}

impl BudgetConfig {
    /// True when no amount has been configured
    pub fn is_unset(&self) -> bool {
        self.monthly_amount <= 0.0
    }

    /// Inclusive day-count of the configured period, when both bounds are set.
    ///
    /// A period of 2025-09-01..2025-09-30 spans 30 days. Returns `None` when
    /// either bound is missing or the bounds are reversed.
    pub fn period_days(&self) -> Option<i64> {
        let (start, end) = (self.period_start?, self.period_end?);
        let days = (end - start).num_days() + 1;
        if days > 0 {
            Some(days)
        } else {
            None
        }
    }

    /// True when `date` falls within the configured period (inclusive bounds).
    /// With no period configured, nothing is in range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}
