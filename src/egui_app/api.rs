//! API Client Module
//!
//! One shared `reqwest::Client` bound to the backend base URL.
//!
//! Every request goes through [`ApiClient::execute`], which:
//!
//! - attaches `Authorization: Bearer <token>` when storage holds a token,
//!   falling back to the default credential set after login
//! - turns a 401 into [`ApiError::Unauthorized`] and any other failure
//!   status into [`ApiError::Status`], keeping the backend's `error` message
//!
//! Deciding what a 401 means for the session is left to the caller.

use std::sync::{PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::egui_app::config::Config;
use crate::egui_app::storage::SessionVault;
use crate::shared::types::ErrorBody;
use crate::shared::ApiError;

pub struct ApiClient {
    http: Client,
    base_url: String,
    vault: SessionVault,
    default_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &Config, vault: SessionVault) -> Self {
        Self::with_client(Client::new(), config.server_url(), vault)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, vault: SessionVault) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            vault,
            default_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential sent when storage has no token. `None` removes it.
    pub fn set_default_token(&self, token: Option<String>) {
        *self
            .default_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn default_token(&self) -> Option<String> {
        self.default_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(path, self.http.post(self.url(path)).json(body))
            .await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(path, self.http.get(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        match self.vault.token() {
            Ok(Some(token)) => Some(token),
            Ok(None) => self.default_token(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                self.default_token()
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        tracing::debug!(path, "Sending API request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(path, "API request unauthorized");
            return Err(ApiError::Unauthorized {
                message: error_message(&body),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::storage::MemoryStore;
    use std::sync::Arc;

    fn client() -> ApiClient {
        let vault = SessionVault::new(Arc::new(MemoryStore::new()));
        ApiClient::with_client(Client::new(), "http://localhost:8080/", vault)
    }

    #[test]
    fn test_base_url_is_normalized() {
        let api = client();
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url("/api/auth/login"), "http://localhost:8080/api/auth/login");
    }

    #[test]
    fn test_default_token_set_and_removed() {
        let api = client();
        assert!(api.bearer().is_none());

        api.set_default_token(Some("abc".to_string()));
        assert_eq!(api.bearer().as_deref(), Some("abc"));

        api.set_default_token(None);
        assert!(api.default_token().is_none());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(br#"{"error":"Invalid email or password"}"#).as_deref(),
            Some("Invalid email or password")
        );
        assert_eq!(error_message(b"<html>oops</html>"), None);
        assert_eq!(error_message(b""), None);
    }
}
