//! # Expense Ledger
//!
//! Persisted store for the ordered collection of expense records. New entries
//! are prepended so the most recent expense is always first. Every mutation
//! writes the whole collection through to the backing store; persistence
//! failures are logged and swallowed, so mutators themselves cannot fail.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::expense::{ExpensePatch, ExpenseRecord};
use crate::storage::KeyValueStore;

/// Backing-store key the ledger persists under
pub const EXPENSE_STORE_KEY: &str = "what_to_eat_today_store";

/// Input for a new ledger entry; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: chrono::DateTime<chrono::FixedOffset>,
    pub method: String,
    pub memo: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedLedger {
    expenses: Vec<ExpenseRecord>,
}

/// Persisted expense ledger
pub struct ExpenseLedger {
    expenses: Vec<ExpenseRecord>,
    store: Arc<dyn KeyValueStore>,
}

impl ExpenseLedger {
    /// Load the ledger from the backing store, starting empty when nothing is
    /// persisted yet or the persisted blob cannot be parsed
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let expenses = match store.get(EXPENSE_STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedLedger>(&raw) {
                Ok(persisted) => persisted.expenses,
                Err(e) => {
                    warn!("Discarding unreadable expense ledger state: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read expense ledger state: {}", e);
                Vec::new()
            }
        };
        info!("Loaded expense ledger with {} entries", expenses.len());
        Self { expenses, store }
    }

    /// Current entries, most recent first
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Add an entry, assigning a collision-resistant id. Returns the new id.
    ///
    /// The store performs no validation; callers check amounts and dates
    /// before submitting.
    pub fn add(&mut self, draft: ExpenseDraft) -> String {
        let id = Uuid::new_v4().to_string();
        self.expenses.insert(
            0,
            ExpenseRecord {
                id: id.clone(),
                title: draft.title,
                category: draft.category,
                amount: draft.amount,
                date: draft.date,
                method: draft.method,
                memo: draft.memo,
            },
        );
        self.persist();
        id
    }

    /// Merge patch fields into the matching record. No-op (returns false)
    /// when the id is absent.
    pub fn update(&mut self, id: &str, patch: &ExpensePatch) -> bool {
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(record) => {
                record.apply_patch(patch);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id. No-op (returns false) when absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Empty the ledger
    pub fn clear(&mut self) {
        self.expenses.clear();
        self.persist();
    }

    fn persist(&self) {
        let persisted = PersistedLedger {
            expenses: self.expenses.clone(),
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(e) = self.store.set(EXPENSE_STORE_KEY, &raw) {
                    warn!("Failed to persist expense ledger: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize expense ledger: {}", e),
        }
    }
}
