//! # Reset Surface
//!
//! Single operation that wipes the whole local footprint: the three in-memory
//! stores plus every backing-store key belonging to the app's namespaces
//! (store blobs, auth state, debug overrides). Used by the "reset all data"
//! action on the settings screen.

use log::{error, info};

use crate::domain::budget_service::BudgetStore;
use crate::domain::expense_service::ExpenseLedger;
use crate::domain::ingredient_service::IngredientInventory;
use crate::storage::KeyValueStore;

/// Result of a reset, shaped for direct display
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub success: bool,
    pub message: String,
}

/// True when `key` belongs to one of the app's storage namespaces
fn is_app_key(key: &str) -> bool {
    key.contains("what_to_eat_today")
        || key.contains("ingredients_store")
        || key.contains("budget_store")
        || key.starts_with("auth/")
        || key.starts_with("debug/")
}

/// Clear all three stores and remove every app-owned backing-store key.
///
/// Never returns an error: failures are reported through the outcome message
/// so the settings screen can show it as-is.
pub fn clear_all_stores(
    expenses: &mut ExpenseLedger,
    budget: &mut BudgetStore,
    inventory: &mut IngredientInventory,
    store: &dyn KeyValueStore,
) -> ResetOutcome {
    info!("Starting complete store reset");

    expenses.clear();
    budget.clear();
    inventory.clear();

    let result = store.get_all_keys().and_then(|keys| {
        let app_keys: Vec<String> = keys.into_iter().filter(|k| is_app_key(k)).collect();
        if !app_keys.is_empty() {
            store.multi_remove(&app_keys)?;
            info!("Removed backing-store keys: {:?}", app_keys);
        }
        Ok(())
    });

    match result {
        Ok(()) => ResetOutcome {
            success: true,
            message: "All data has been reset.".to_string(),
        },
        Err(e) => {
            error!("Failed to clear backing store: {}", e);
            ResetOutcome {
                success: false,
                message: "Something went wrong while resetting data.".to_string(),
            }
        }
    }
}
