//! # Auth
//!
//! Login and registration against the auth endpoints. A successful response
//! yields a bearer token which is persisted under the auth key and attached to
//! every subsequent request by the client. Token-field naming varies across
//! server revisions, so extraction probes the known spellings.

use log::{info, warn};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use crate::api::client::{ApiClient, AUTH_LAST_RESPONSE_KEY, AUTH_TOKEN_KEY};
use crate::api::error::ApiError;

const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

const TOKEN_FIELDS: &[&str] = &["access_token", "accessToken", "token", "jwt"];

/// Login/registration input
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Minimal shape check for an email address
fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

fn validate(credentials: &Credentials) -> Result<(), ApiError> {
    if !is_valid_email(&credentials.email) {
        return Err(ApiError::Validation("the email address is not valid".to_string()));
    }
    if credentials.password.len() < 6 {
        return Err(ApiError::Validation(
            "the password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Pull the bearer token out of an auth response, whatever the field name
fn extract_token(payload: &Value) -> Option<String> {
    TOKEN_FIELDS
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_str))
        .map(str::to_string)
}

/// Persist the token and the raw response. Persistence failures are logged
/// only; the caller still gets the successful payload.
fn save_auth(client: &ApiClient, payload: &Value) {
    match extract_token(payload) {
        Some(token) => {
            if let Err(e) = client.store().set(AUTH_TOKEN_KEY, &token) {
                warn!("Failed to persist auth token: {}", e);
            }
        }
        None => warn!("Auth response carried no recognizable token field"),
    }
    if let Err(e) = client.store().set(AUTH_LAST_RESPONSE_KEY, &payload.to_string()) {
        warn!("Failed to persist auth response: {}", e);
    }
}

async fn post_credentials(
    client: &ApiClient,
    path: &str,
    credentials: Credentials,
) -> Result<Value, ApiError> {
    validate(&credentials)?;

    let payload = serde_json::json!({
        "email": credentials.email.trim(),
        "password": credentials.password,
    });
    let data = client
        .request(Method::POST, path, Some(&payload), AUTH_TIMEOUT)
        .await?;
    save_auth(client, &data);
    Ok(data)
}

/// Log in and persist the issued token
pub async fn login(client: &ApiClient, credentials: Credentials) -> Result<Value, ApiError> {
    let data = post_credentials(client, "/auth/login", credentials).await?;
    info!("Login succeeded");
    Ok(data)
}

/// Register a new account; a token in the response is persisted as with login
pub async fn register(client: &ApiClient, credentials: Credentials) -> Result<Value, ApiError> {
    let data = post_credentials(client, "/auth/register", credentials).await?;
    info!("Registration succeeded");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use crate::storage::traits::KeyValueStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        ApiClient::with_base_url(Arc::new(MemoryKeyValueStore::new()), "http://127.0.0.1:1")
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("  user@example.com  "));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_reach_network() {
        let bad_email = Credentials {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(matches!(
            login(&offline_client(), bad_email).await,
            Err(ApiError::Validation(_))
        ));

        let short_password = Credentials {
            email: "user@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(matches!(
            register(&offline_client(), short_password).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_extract_token_probes_known_field_names() {
        for field in ["access_token", "accessToken", "token", "jwt"] {
            let payload = serde_json::json!({ field: "tok-123" });
            assert_eq!(extract_token(&payload).as_deref(), Some("tok-123"));
        }
        assert_eq!(extract_token(&serde_json::json!({ "user": "x" })), None);
    }

    #[test]
    fn test_save_auth_persists_token_and_raw_response() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let client = ApiClient::new(store.clone());

        let payload = serde_json::json!({ "accessToken": "tok-456", "user": "u" });
        save_auth(&client, &payload);

        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-456"));
        assert!(store.get(AUTH_LAST_RESPONSE_KEY).unwrap().is_some());
    }
}
