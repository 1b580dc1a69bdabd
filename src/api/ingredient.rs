//! # Ingredient Sync
//!
//! Create, list, and delete ingredients on the server, translating between the
//! wire shape (`quantity` + `unit` + `expirationDate`) and the local record
//! shape (composite `qty` + `expiry`). Listing is the one operation with
//! automatic retry; create and delete fail fast and leave the retry to the
//! user.

use chrono::{DateTime, NaiveDate};
use log::{info, warn};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::retry::{with_retry, RetryPolicy};
use crate::domain::ingredient_service::IngredientInventory;
use crate::domain::models::ingredient::IngredientRecord;

const CREATE_TIMEOUT: Duration = Duration::from_secs(10);
const LIST_TIMEOUT: Duration = Duration::from_secs(30);
const DELETE_TIMEOUT: Duration = Duration::from_secs(30);

/// Ingredient to register on the server
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Sent as an RFC 3339 timestamp at midnight UTC
    pub expiration_date: Option<NaiveDate>,
}

/// Row shape of `GET /api/ingredient`
#[derive(Debug, Deserialize)]
struct WireIngredient {
    /// Server ids arrive as strings or numbers depending on the backend
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    unit: String,
    #[serde(rename = "expirationDate", default)]
    expiration_date: Option<String>,
}

impl WireIngredient {
    /// Remap into the local record shape, synthesizing an id when absent
    fn into_record(self) -> IngredientRecord {
        let id = match self.id {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("server_{}", Uuid::new_v4()),
        };
        IngredientRecord {
            id,
            name: self.name,
            qty: format!("{}{}", self.quantity, self.unit),
            expiry: self.expiration_date.as_deref().and_then(parse_wire_date),
        }
    }
}

/// Accept both date-only (`2025-09-15`) and full RFC 3339 expiry values
fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.date_naive()),
        Err(e) => {
            warn!("Ignoring unparseable expiry '{}': {}", raw, e);
            None
        }
    }
}

fn validate(ingredient: &NewIngredient) -> Result<NaiveDate, ApiError> {
    if ingredient.name.trim().is_empty() {
        return Err(ApiError::Validation("enter an ingredient name".to_string()));
    }
    if !ingredient.quantity.is_finite() || ingredient.quantity <= 0.0 {
        return Err(ApiError::Validation(
            "quantity must be a number greater than zero".to_string(),
        ));
    }
    if ingredient.unit.trim().is_empty() {
        return Err(ApiError::Validation("select a unit".to_string()));
    }
    ingredient
        .expiration_date
        .ok_or_else(|| ApiError::Validation("select an expiry date".to_string()))
}

/// Register an ingredient on the server. Returns the parsed response body so
/// the caller can merge the server's copy back into local state.
pub async fn create_ingredient(
    client: &ApiClient,
    ingredient: NewIngredient,
) -> Result<Value, ApiError> {
    let expiry = validate(&ingredient)?;

    let expiration_date = expiry
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339())
        .ok_or_else(|| ApiError::Validation("select an expiry date".to_string()))?;

    let payload = serde_json::json!({
        "name": ingredient.name.trim(),
        "quantity": ingredient.quantity,
        "unit": ingredient.unit.trim(),
        "expirationDate": expiration_date,
    });

    let data = client
        .request(Method::POST, "/api/ingredient", Some(&payload), CREATE_TIMEOUT)
        .await?;
    info!("Ingredient created on server");
    Ok(data)
}

/// Fetch the server's ingredient listing, remapped into local record shape.
///
/// Transient failures (5xx, timeout, unreachable) retry up to 2 more times
/// with 1 s / 2 s backoff before the error surfaces.
pub async fn list_ingredients(client: &ApiClient) -> Result<Vec<IngredientRecord>, ApiError> {
    let data = with_retry(RetryPolicy::list_default(), |attempt| async move {
        if attempt > 0 {
            info!("Retrying ingredient list (attempt {})", attempt + 1);
        }
        client
            .request(Method::GET, "/api/ingredient", None, LIST_TIMEOUT)
            .await
    })
    .await?;

    let records = parse_listing(data);
    info!("Fetched {} ingredients from server", records.len());
    Ok(records)
}

/// Decode a 2xx listing body into local records. A body that is not an array
/// of wire rows is logged and treated as empty.
fn parse_listing(data: Value) -> Vec<IngredientRecord> {
    match serde_json::from_value::<Vec<WireIngredient>>(data) {
        Ok(rows) => rows.into_iter().map(WireIngredient::into_record).collect(),
        Err(e) => {
            warn!("Ignoring malformed ingredient listing: {}", e);
            Vec::new()
        }
    }
}

/// Delete an ingredient on the server by id. The caller removes the record
/// from local state only after this succeeds.
pub async fn delete_ingredient(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::Validation("an ingredient id is required".to_string()));
    }

    let path = format!("/api/ingredient/{}", id);
    let data = client
        .request(Method::DELETE, &path, None, DELETE_TIMEOUT)
        .await?;
    info!("Ingredient {} deleted on server", id);
    Ok(data)
}

/// Fetch the server listing and replace the local inventory with it when the
/// server returned anything; an empty listing leaves local state untouched.
pub async fn sync_inventory(
    client: &ApiClient,
    inventory: &mut IngredientInventory,
) -> Result<usize, ApiError> {
    let records = list_ingredients(client).await?;
    let count = records.len();
    if count > 0 {
        inventory.load_from_server(records);
        info!("Inventory sync completed: {} items", count);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        ApiClient::with_base_url(Arc::new(MemoryKeyValueStore::new()), "http://127.0.0.1:1")
    }

    fn valid() -> NewIngredient {
        NewIngredient {
            name: "양파".to_string(),
            quantity: 5.0,
            unit: "개".to_string(),
            expiration_date: Some("2025-09-20".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_network() {
        let client = offline_client();

        let mut missing_name = valid();
        missing_name.name = "  ".to_string();
        assert!(matches!(
            create_ingredient(&client, missing_name).await,
            Err(ApiError::Validation(_))
        ));

        let mut zero_qty = valid();
        zero_qty.quantity = 0.0;
        assert!(matches!(
            create_ingredient(&client, zero_qty).await,
            Err(ApiError::Validation(_))
        ));

        let mut no_unit = valid();
        no_unit.unit = String::new();
        assert!(matches!(
            create_ingredient(&client, no_unit).await,
            Err(ApiError::Validation(_))
        ));

        let mut no_expiry = valid();
        no_expiry.expiration_date = None;
        assert!(matches!(
            create_ingredient(&client, no_expiry).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_an_id() {
        let result = delete_ingredient(&offline_client(), "").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_wire_row_remaps_to_local_shape() {
        let row: WireIngredient = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "두부",
            "quantity": 2.0,
            "unit": "모",
            "expirationDate": "2025-09-15T00:00:00Z",
        }))
        .unwrap();

        let record = row.into_record();
        assert_eq!(record.id, "42");
        assert_eq!(record.name, "두부");
        assert_eq!(record.qty, "2모");
        assert_eq!(record.expiry, Some("2025-09-15".parse().unwrap()));
    }

    #[test]
    fn test_wire_row_without_id_synthesizes_one() {
        let row: WireIngredient = serde_json::from_value(serde_json::json!({
            "name": "계란",
            "quantity": 10.0,
            "unit": "개",
        }))
        .unwrap();

        let record = row.into_record();
        assert!(record.id.starts_with("server_"));
        assert_eq!(record.qty, "10개");
        assert_eq!(record.expiry, None);
    }

    #[test]
    fn test_parse_listing_handles_malformed_body() {
        assert!(parse_listing(serde_json::json!({ "oops": true })).is_empty());
        assert!(parse_listing(serde_json::json!("raw text")).is_empty());

        let records = parse_listing(serde_json::json!([
            { "name": "양파", "quantity": 5.0, "unit": "개" },
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].qty, "5개");
    }

    #[test]
    fn test_parse_wire_date_accepts_both_shapes() {
        assert_eq!(parse_wire_date("2025-09-15"), Some("2025-09-15".parse().unwrap()));
        assert_eq!(
            parse_wire_date("2025-09-15T09:30:00+09:00"),
            Some("2025-09-15".parse().unwrap())
        );
        assert_eq!(parse_wire_date("next week"), None);
    }
}
