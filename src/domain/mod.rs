//! # Domain Module
//!
//! The persisted stores and the pure computations layered on top of them.
//!
//! Each store owns its in-memory collection plus a handle to the backing store
//! and writes its whole state through after every mutation. Mutations are
//! synchronous; persistence is best-effort (failures are logged, never
//! surfaced), so the in-memory state stays authoritative for the session.

pub mod budget_service;
pub mod expense_service;
pub mod ingredient_service;
pub mod models;
pub mod reset_service;
pub mod summary;

pub use budget_service::BudgetStore;
pub use expense_service::{ExpenseDraft, ExpenseLedger};
pub use ingredient_service::{IngredientDraft, IngredientInventory, IngredientPatch, NeededIngredient};
pub use reset_service::{clear_all_stores, ResetOutcome};
