//! # Budget Sync
//!
//! Create a budget on the server. Validation happens entirely locally and a
//! failure returns before any request is built; the server sees only
//! well-formed payloads.

use chrono::NaiveDate;
use log::info;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;

const CREATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget to mirror to the server
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub amount: f64,
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
}

/// Wire payload for `POST /api/budgets`; dates serialize as `YYYY-MM-DD`
#[derive(Debug, Serialize)]
struct CreateBudgetRequest {
    amount: f64,
    #[serde(rename = "startAt")]
    start_at: NaiveDate,
    #[serde(rename = "endAt")]
    end_at: NaiveDate,
}

fn validate(budget: &NewBudget) -> Result<(), ApiError> {
    if !budget.amount.is_finite() || budget.amount <= 0.0 {
        return Err(ApiError::Validation(
            "budget amount must be greater than zero".to_string(),
        ));
    }
    if budget.start_at > budget.end_at {
        return Err(ApiError::Validation(
            "the end date must not be before the start date".to_string(),
        ));
    }
    Ok(())
}

/// Create a budget on the server. Returns the parsed response body, which
/// carries the server-issued budget fields.
pub async fn create_budget(client: &ApiClient, budget: NewBudget) -> Result<Value, ApiError> {
    validate(&budget)?;

    let payload = serde_json::to_value(CreateBudgetRequest {
        amount: budget.amount,
        start_at: budget.start_at,
        end_at: budget.end_at,
    })
    .map_err(|e| ApiError::Validation(e.to_string()))?;

    let data = client
        .request(Method::POST, "/api/budgets", Some(&payload), CREATE_TIMEOUT)
        .await?;
    info!("Budget created on server");
    Ok(data)
}
