/**
 * Authentication Module
 *
 * Session store: the single writer of the persisted token/user pair and of
 * the in-memory auth state. Forms call `login`/`register`/`logout`; the
 * desktop shell calls `restore` once at startup.
 */

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::storage::{KeyValueStore, SessionVault};
use crate::shared::{
    ApiError, AuthResponse, LoginRequest, Navigator, Profile, RegisterRequest, Route, Session,
    StorageError, UserRecord,
};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const PROFILE_PATH: &str = "/api/user/profile";

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Authentication state
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub current_user: Option<UserRecord>,
    /// True until the persisted session has been looked at
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            current_user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Result of `login`/`register`. These never fail any other way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}

pub struct SessionStore {
    api: ApiClient,
    vault: SessionVault,
    navigator: Arc<dyn Navigator>,
    state: RwLock<AuthState>,
}

impl SessionStore {
    pub fn new(api: ApiClient, vault: SessionVault, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            vault,
            navigator,
            state: RwLock::new(AuthState::new()),
        }
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let vault = SessionVault::new(store);
        let api = ApiClient::new(config, vault.clone());
        Self::new(api, vault, navigator)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.state().current_user
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    fn update_state(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    /// Pick up a session left in storage by a previous run.
    pub fn restore(&self) {
        let restored = match self.vault.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session");
                None
            }
        };

        match restored {
            Some(session) => {
                tracing::info!(email = %session.user.email, "Restored stored session");
                self.api.set_default_token(Some(session.token));
                self.update_state(|state| {
                    state.current_user = Some(session.user);
                    state.loading = false;
                });
            }
            None => {
                tracing::debug!("No stored session");
                self.update_state(|state| state.loading = false);
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate(LOGIN_PATH, &request, LOGIN_FAILED).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthOutcome {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate(REGISTER_PATH, &request, REGISTER_FAILED)
            .await
    }

    /// Drop the session locally. Safe to call when already logged out.
    pub fn logout(&self) {
        self.clear_session();
        tracing::info!("Logged out");
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.api
            .get_json(PROFILE_PATH)
            .await
            .inspect_err(|e| self.handle_api_error(e))
    }

    /// Session policy for failed requests: a 401 from any endpoint ends the
    /// session and sends the user back to the login page.
    pub fn handle_api_error(&self, error: &ApiError) {
        if error.is_unauthorized() {
            tracing::warn!("Backend rejected credentials, clearing session");
            self.clear_session();
            self.navigator.navigate(Route::Login);
        }
    }

    async fn authenticate<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> AuthOutcome {
        let response = match self.api.post_json::<B, AuthResponse>(path, body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(path, error = %e, "Authentication request failed");
                self.handle_api_error(&e);
                return AuthOutcome::failure(e.backend_message().unwrap_or(fallback));
            }
        };

        match self.establish(response.into()) {
            Ok(()) => AuthOutcome::Success,
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to persist session");
                AuthOutcome::failure(fallback)
            }
        }
    }

    fn establish(&self, session: Session) -> Result<(), StorageError> {
        self.vault.save(&session)?;
        tracing::info!(email = %session.user.email, "Authenticated");
        self.api.set_default_token(Some(session.token));
        self.update_state(|state| state.current_user = Some(session.user));
        Ok(())
    }

    fn clear_session(&self) {
        if let Err(e) = self.vault.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.api.set_default_token(None);
        self.update_state(|state| state.current_user = None);
    }
}
