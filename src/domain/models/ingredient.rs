//! Domain model for a pantry ingredient.
//!
//! Quantities are composite "number + unit" strings exactly as the user typed
//! them ("5개", "200g", "1L"); arithmetic works on the leading integer and
//! preserves the unit suffix. Freshness ("D-day") is derived at read time from
//! the stored expiry date and is never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default lookahead window for the near-expiry warning, in days
pub const DEFAULT_NEAR_EXPIRY_DAYS: i64 = 2;

/// Read-time freshness classification of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Expiry in the future (beyond the lookahead window) or not set
    Active,
    /// Expiry within the lookahead window, today included
    NearExpiry,
    /// Expiry in the past
    Expired,
}

/// A single pantry ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: String,
    pub name: String,
    /// Composite quantity string, e.g. "5개" or "200g"
    pub qty: String,
    pub expiry: Option<NaiveDate>,
}

impl IngredientRecord {
    /// Days remaining until expiry relative to `today` (the "D-day" figure).
    /// Negative once expired; `None` when no expiry is set.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry.map(|expiry| (expiry - today).num_days())
    }

    /// Classify freshness relative to `today` with the given lookahead window
    pub fn freshness(&self, today: NaiveDate, lookahead_days: i64) -> Freshness {
        match self.days_until_expiry(today) {
            None => Freshness::Active,
            Some(days) if days < 0 => Freshness::Expired,
            Some(days) if days <= lookahead_days => Freshness::NearExpiry,
            Some(_) => Freshness::Active,
        }
    }

    /// Numeric portion of the quantity string (leading integer), if any.
    /// A zero quantity means "not set" for display purposes.
    pub fn qty_number(&self) -> Option<i64> {
        parse_leading_number(&self.qty)
    }

    /// Unit suffix of the quantity string with all digits stripped
    pub fn qty_unit(&self) -> String {
        self.qty.chars().filter(|c| !c.is_ascii_digit()).collect()
    }
}

/// Parse the leading unsigned integer of a quantity string ("200g" -> 200)
pub fn parse_leading_number(qty: &str) -> Option<i64> {
    let digits: String = qty
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
