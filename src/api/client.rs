//! # API Client
//!
//! Shared plumbing for every remote operation: base-URL resolution with the
//! debug override, bearer-token injection from persisted auth state, slash-safe
//! URL joining, per-request timeouts, and response decoding into the error
//! taxonomy. Individual operations live in the sibling modules.

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::api::error::ApiError;
use crate::storage::KeyValueStore;

/// Compiled-in default server address
pub const DEFAULT_API_BASE: &str = "http://what2eat.duckdns.org:8080";

/// Backing-store key holding a runtime base-URL override for debugging
pub const API_BASE_OVERRIDE_KEY: &str = "debug/API_BASE";

/// Backing-store key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "auth/accessToken";

/// Backing-store key holding the last raw auth response, kept for recovery
pub const AUTH_LAST_RESPONSE_KEY: &str = "auth/lastResponse";

/// Join a base URL and a path without doubling or dropping slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Client for the what2eat server
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
    default_base_url: String,
}

impl ApiClient {
    /// Create a client using the compiled-in default base URL
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_base_url(store, DEFAULT_API_BASE)
    }

    /// Create a client with an explicit default base URL (tests, staging)
    pub fn with_base_url(store: Arc<dyn KeyValueStore>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            store,
            default_base_url: base_url.into(),
        }
    }

    /// Resolve the base URL: debug override from the backing store first,
    /// then the compiled-in default
    pub fn base_url(&self) -> String {
        match self.store.get(API_BASE_OVERRIDE_KEY) {
            Ok(Some(override_base)) if !override_base.trim().is_empty() => {
                debug!("API base override active: {}", override_base);
                override_base
            }
            Ok(_) => self.default_base_url.clone(),
            Err(e) => {
                warn!("Failed to read API base override: {}", e);
                self.default_base_url.clone()
            }
        }
    }

    fn auth_token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read auth token: {}", e);
                None
            }
        }
    }

    /// Issue a request and decode the response.
    ///
    /// Success bodies parse as JSON (raw text is wrapped as `{"raw": ...}`,
    /// an empty body becomes `{"success": true}`). Non-2xx responses classify
    /// into [`ApiError`], preferring the server's `message`/`detail` field.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let url = join_url(&self.base_url(), path);
        info!("{} {} (timeout: {:?})", method, url, timeout);

        let mut builder = self
            .http
            .request(method, &url)
            .timeout(timeout)
            .header("Content-Type", "application/json");

        if let Some(token) = self.auth_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            debug!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let data: Option<Value> = if text.is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                Err(_) => Some(serde_json::json!({ "raw": text })),
            }
        };
        debug!("Response status: {}, body: {:?}", status, data);

        if !(200..300).contains(&status) {
            let message = data
                .as_ref()
                .and_then(|d| {
                    d.get("message")
                        .or_else(|| d.get("detail"))
                        .and_then(Value::as_str)
                })
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(ApiError::classify(status, message));
        }

        Ok(data.unwrap_or_else(|| serde_json::json!({ "success": true })))
    }

    /// Backing store this client reads auth/debug state from
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}
