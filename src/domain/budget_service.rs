//! # Budget Store
//!
//! Persisted store for the singleton budget configuration. The store itself
//! does not validate period ordering; screens check `start <= end` before
//! calling `set_period`, matching the contract of the create-budget hook.

use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::models::budget::BudgetConfig;
use crate::storage::KeyValueStore;

/// Backing-store key the budget configuration persists under
pub const BUDGET_STORE_KEY: &str = "budget_store";

/// Persisted budget configuration store
pub struct BudgetStore {
    config: BudgetConfig,
    store: Arc<dyn KeyValueStore>,
}

impl BudgetStore {
    /// Load the configuration from the backing store, defaulting when nothing
    /// is persisted yet or the persisted blob cannot be parsed
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let config = match store.get(BUDGET_STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BudgetConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Discarding unreadable budget state: {}", e);
                    BudgetConfig::default()
                }
            },
            Ok(None) => BudgetConfig::default(),
            Err(e) => {
                warn!("Failed to read budget state: {}", e);
                BudgetConfig::default()
            }
        };
        Self { config, store }
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// Set the budget amount. Non-finite or negative input coerces to 0
    /// (0 means unset).
    pub fn set_amount(&mut self, value: f64) {
        self.config.monthly_amount = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        self.persist();
    }

    /// Store the period bounds verbatim. Callers validate `start <= end`
    /// before calling; the store does not reject reversed ranges.
    pub fn set_period(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.config.period_start = start;
        self.config.period_end = end;
        self.persist();
    }

    /// Reflect a server-created budget: remember the server id and take the
    /// amount the server confirmed
    pub fn apply_server_budget(&mut self, server_id: Option<String>, amount: f64) {
        self.config.server_id = server_id;
        self.config.monthly_amount = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            0.0
        };
        info!(
            "Applied server budget: id={:?}, amount={}",
            self.config.server_id, self.config.monthly_amount
        );
        self.persist();
    }

    /// Reset amount, period, and server id
    pub fn clear(&mut self) {
        self.config = BudgetConfig::default();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.config) {
            Ok(raw) => {
                if let Err(e) = self.store.set(BUDGET_STORE_KEY, &raw) {
                    warn!("Failed to persist budget config: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize budget config: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_set_amount_coerces_invalid_input_to_zero() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut budget = BudgetStore::load(store);

        budget.set_amount(150000.0);
        assert_eq!(budget.config().monthly_amount, 150000.0);

        budget.set_amount(f64::NAN);
        assert_eq!(budget.config().monthly_amount, 0.0);

        budget.set_amount(-500.0);
        assert_eq!(budget.config().monthly_amount, 0.0);
        assert!(budget.config().is_unset());
    }

    #[test]
    fn test_set_period_stores_bounds_verbatim() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut budget = BudgetStore::load(store);

        budget.set_period(Some(date("2025-09-01")), Some(date("2025-09-30")));
        assert_eq!(budget.config().period_start, Some(date("2025-09-01")));
        assert_eq!(budget.config().period_end, Some(date("2025-09-30")));
        assert_eq!(budget.config().period_days(), Some(30));
    }

    #[test]
    fn test_clear_resets_everything() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut budget = BudgetStore::load(store);

        budget.set_amount(100000.0);
        budget.set_period(Some(date("2025-09-01")), Some(date("2025-09-30")));
        budget.apply_server_budget(Some("bgt-7".to_string()), 100000.0);

        budget.clear();
        assert_eq!(budget.config(), &BudgetConfig::default());
    }

    #[test]
    fn test_round_trip_through_backing_store() {
        let store = Arc::new(MemoryKeyValueStore::new());

        let mut budget = BudgetStore::load(store.clone());
        budget.set_amount(200000.0);
        budget.set_period(Some(date("2025-09-01")), Some(date("2025-09-30")));
        let original = budget.config().clone();

        let reloaded = BudgetStore::load(store);
        assert_eq!(reloaded.config(), &original);
    }
}
