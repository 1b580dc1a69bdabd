//! # Ingredient Inventory
//!
//! Persisted store for the pantry. Beyond the usual CRUD surface it supports
//! full replacement from a server listing and quantity consumption when a
//! recipe is cooked. Consumption works on the leading integer of the composite
//! quantity string and floors at zero; zero-quantity records stay in the
//! collection so display logic can show them as "not set".

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::ingredient::{parse_leading_number, IngredientRecord};
use crate::storage::KeyValueStore;

/// Backing-store key the inventory persists under
pub const INGREDIENT_STORE_KEY: &str = "ingredients_store";

/// Input for a new inventory entry; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub qty: String,
    pub expiry: Option<chrono::NaiveDate>,
}

/// Partial update for an ingredient; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub qty: Option<String>,
    pub expiry: Option<Option<chrono::NaiveDate>>,
}

/// A recipe requirement to subtract from the pantry, e.g. `{양파, 2개}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeededIngredient {
    pub name: String,
    pub qty: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedInventory {
    ingredients: Vec<IngredientRecord>,
}

/// Persisted ingredient inventory
pub struct IngredientInventory {
    ingredients: Vec<IngredientRecord>,
    store: Arc<dyn KeyValueStore>,
}

impl IngredientInventory {
    /// Load the inventory from the backing store, starting empty when nothing
    /// is persisted yet or the persisted blob cannot be parsed
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ingredients = match store.get(INGREDIENT_STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedInventory>(&raw) {
                Ok(persisted) => persisted.ingredients,
                Err(e) => {
                    warn!("Discarding unreadable ingredient state: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read ingredient state: {}", e);
                Vec::new()
            }
        };
        info!("Loaded ingredient inventory with {} entries", ingredients.len());
        Self { ingredients, store }
    }

    /// Current ingredients, most recently added first
    pub fn ingredients(&self) -> &[IngredientRecord] {
        &self.ingredients
    }

    /// Add an ingredient, assigning a collision-resistant id. Returns the id.
    pub fn add(&mut self, draft: IngredientDraft) -> String {
        let id = Uuid::new_v4().to_string();
        self.ingredients.insert(
            0,
            IngredientRecord {
                id: id.clone(),
                name: draft.name,
                qty: draft.qty,
                expiry: draft.expiry,
            },
        );
        self.persist();
        id
    }

    /// Merge patch fields into the matching record. No-op (returns false)
    /// when the id is absent.
    pub fn update(&mut self, id: &str, patch: &IngredientPatch) -> bool {
        match self.ingredients.iter_mut().find(|i| i.id == id) {
            Some(record) => {
                if let Some(name) = &patch.name {
                    record.name = name.clone();
                }
                if let Some(qty) = &patch.qty {
                    record.qty = qty.clone();
                }
                if let Some(expiry) = patch.expiry {
                    record.expiry = expiry;
                }
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id. No-op (returns false) when absent.
    ///
    /// When the record is mirrored remotely, screens call the remote delete
    /// first and only remove locally after it succeeded.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.id != id);
        let removed = self.ingredients.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Empty the inventory
    pub fn clear(&mut self) {
        self.ingredients.clear();
        self.persist();
    }

    /// Replace the whole collection with a list received from the server.
    /// The list has already been remapped into local record shape by the API
    /// layer; records arriving without an id get a synthesized one.
    pub fn load_from_server(&mut self, remote: Vec<IngredientRecord>) {
        self.ingredients = remote
            .into_iter()
            .map(|mut record| {
                if record.id.is_empty() {
                    record.id = format!("server_{}", Uuid::new_v4());
                }
                record
            })
            .collect();
        info!("Replaced inventory from server: {} items", self.ingredients.len());
        self.persist();
    }

    /// Subtract recipe requirements from the pantry.
    ///
    /// Matching is by exact name. The leading integer of the needed quantity
    /// is subtracted from the leading integer of the local quantity, floored
    /// at zero, and the local unit suffix is kept. Needed entries with no
    /// matching record, and quantities with no leading number on either side,
    /// are ignored.
    pub fn consume(&mut self, needed: &[NeededIngredient]) {
        let mut changed = false;
        for record in &mut self.ingredients {
            let need = match needed.iter().find(|n| n.name == record.name) {
                Some(need) => need,
                None => continue,
            };
            let have = match parse_leading_number(&record.qty) {
                Some(n) => n,
                None => continue,
            };
            let take = match parse_leading_number(&need.qty) {
                Some(n) => n,
                None => continue,
            };
            let remain = (have - take).max(0);
            let unit: String = record.qty.chars().filter(|c| !c.is_ascii_digit()).collect();
            record.qty = format!("{}{}", remain, unit);
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    fn persist(&self) {
        let persisted = PersistedInventory {
            ingredients: self.ingredients.clone(),
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(e) = self.store.set(INGREDIENT_STORE_KEY, &raw) {
                    warn!("Failed to persist ingredient inventory: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize ingredient inventory: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ingredient::{Freshness, DEFAULT_NEAR_EXPIRY_DAYS};
    use crate::storage::MemoryKeyValueStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft(name: &str, qty: &str, expiry: Option<&str>) -> IngredientDraft {
        IngredientDraft {
            name: name.to_string(),
            qty: qty.to_string(),
            expiry: expiry.map(|s| date(s)),
        }
    }

    fn needed(name: &str, qty: &str) -> NeededIngredient {
        NeededIngredient {
            name: name.to_string(),
            qty: qty.to_string(),
        }
    }

    #[test]
    fn test_add_update_remove() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut inventory = IngredientInventory::load(store);

        let id = inventory.add(draft("양파", "5개", Some("2025-09-20")));
        inventory.add(draft("우유", "1L", Some("2025-09-12")));
        assert_eq!(inventory.ingredients().len(), 2);
        assert_eq!(inventory.ingredients()[0].name, "우유");

        assert!(inventory.update(
            &id,
            &IngredientPatch {
                qty: Some("3개".to_string()),
                ..Default::default()
            }
        ));
        assert_eq!(inventory.ingredients()[1].qty, "3개");

        assert!(inventory.remove(&id));
        assert!(!inventory.remove(&id));
        assert_eq!(inventory.ingredients().len(), 1);
    }

    #[test]
    fn test_consume_subtracts_and_floors_at_zero() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut inventory = IngredientInventory::load(store);
        inventory.add(draft("양파", "5개", None));

        inventory.consume(&[needed("양파", "2개")]);
        assert_eq!(inventory.ingredients()[0].qty, "3개");

        for _ in 0..3 {
            inventory.consume(&[needed("양파", "2개")]);
        }
        assert_eq!(inventory.ingredients()[0].qty, "0개");

        // Zero-quantity records stay in the collection
        assert_eq!(inventory.ingredients().len(), 1);
    }

    #[test]
    fn test_consume_ignores_unmatched_names() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut inventory = IngredientInventory::load(store);
        inventory.add(draft("양파", "5개", None));

        inventory.consume(&[needed("대파", "2개")]);
        assert_eq!(inventory.ingredients()[0].qty, "5개");
    }

    #[test]
    fn test_consume_keeps_unit_suffix() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut inventory = IngredientInventory::load(store);
        inventory.add(draft("밀가루", "500g", None));

        inventory.consume(&[needed("밀가루", "200g")]);
        assert_eq!(inventory.ingredients()[0].qty, "300g");
    }

    #[test]
    fn test_load_from_server_replaces_collection_and_synthesizes_ids() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut inventory = IngredientInventory::load(store);
        inventory.add(draft("양파", "5개", None));

        inventory.load_from_server(vec![
            IngredientRecord {
                id: "42".to_string(),
                name: "두부".to_string(),
                qty: "2모".to_string(),
                expiry: Some(date("2025-09-15")),
            },
            IngredientRecord {
                id: String::new(),
                name: "계란".to_string(),
                qty: "10개".to_string(),
                expiry: None,
            },
        ]);

        assert_eq!(inventory.ingredients().len(), 2);
        assert_eq!(inventory.ingredients()[0].id, "42");
        assert!(inventory.ingredients()[1].id.starts_with("server_"));
    }

    #[test]
    fn test_near_expiry_item_then_remove_and_reload() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let today = date("2025-09-10");

        let mut inventory = IngredientInventory::load(store.clone());
        let id = inventory.add(draft("우유", "1L", Some("2025-09-11")));

        assert_eq!(
            inventory.ingredients()[0].freshness(today, DEFAULT_NEAR_EXPIRY_DAYS),
            Freshness::NearExpiry
        );

        assert!(inventory.remove(&id));
        assert!(inventory.ingredients().is_empty());

        let reloaded = IngredientInventory::load(store);
        assert!(reloaded.ingredients().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let store = Arc::new(MemoryKeyValueStore::new());

        let mut inventory = IngredientInventory::load(store.clone());
        inventory.add(draft("양파", "5개", Some("2025-09-20")));
        inventory.add(draft("우유", "1L", Some("2025-09-12")));
        let original: Vec<_> = inventory.ingredients().to_vec();

        let reloaded = IngredientInventory::load(store);
        assert_eq!(reloaded.ingredients(), original.as_slice());
    }
}
