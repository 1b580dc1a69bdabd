//! # Remote Sync API
//!
//! Thin client for the what2eat server. Each operation follows the same shape:
//! validate locally (returning [`ApiError::Validation`] before any network
//! I/O), issue the request with a bearer token and a per-operation timeout,
//! classify non-2xx responses into the shared error taxonomy, and hand parsed
//! JSON back to the caller. Only the list operation retries automatically.

pub mod auth;
pub mod budget;
pub mod client;
pub mod error;
pub mod ingredient;
pub mod retry;

pub use auth::Credentials;
pub use budget::NewBudget;
pub use client::ApiClient;
pub use error::ApiError;
pub use ingredient::NewIngredient;
pub use retry::RetryPolicy;
