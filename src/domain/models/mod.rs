pub mod budget;
pub mod expense;
pub mod ingredient;

pub use budget::BudgetConfig;
pub use expense::{ExpensePatch, ExpenseRecord, DEFAULT_CATEGORY};
pub use ingredient::{Freshness, IngredientRecord, DEFAULT_NEAR_EXPIRY_DAYS};
