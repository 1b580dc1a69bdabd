//! # what2eat-core
//!
//! Data-model core for the what2eat household food budget and pantry app.
//!
//! This crate holds everything below the presentation layer:
//!
//! - `storage`: a narrow key-value backing store abstraction with a file-backed
//!   implementation and an in-memory fake for tests
//! - `domain`: the three persisted stores (expense ledger, budget config,
//!   ingredient inventory), the derived view computations, and the reset surface
//! - `api`: the remote sync client (budgets, ingredients, auth) with timeout,
//!   retry, and error classification
//!
//! Stores are explicit objects constructed once at application start and passed
//! by reference to consumers; there is no module-level shared state.

pub mod api;
pub mod domain;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use domain::models::{
    BudgetConfig, ExpensePatch, ExpenseRecord, Freshness, IngredientRecord,
};
pub use domain::{BudgetStore, ExpenseLedger, IngredientInventory};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
