//! egui Native Desktop App Module
//!
//! The authentication client and the desktop shell around it.
//!
//! # Architecture
//!
//! - **`config`** - Resolved configuration (server URL, storage path, log filter)
//! - **`storage`** - Persistent key/value store and the session pair vault
//! - **`api`** - Shared HTTP client with bearer injection and typed 401s
//! - **`auth`** - Session store: restore, login, register, logout
//! - **`forms`** - Login and register form state machines
//! - **`state`** - Per-window state driving background work and routes
//! - **`views`** - egui rendering for each route
//! - **`main`** - Binary entry point
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Main application entry point
//! ├── config.rs   - Configuration management
//! ├── storage.rs  - Key/value stores and SessionVault
//! ├── api.rs      - API client
//! ├── auth.rs     - Session store
//! ├── forms.rs    - Form state machines
//! ├── state/      - AppState
//! ├── views/      - Login, register, dashboard
//! └── theme/      - Colors and frames
//! ```

pub mod config;
pub mod storage;
pub mod api;
pub mod auth;
pub mod forms;
pub mod state;
pub mod views;
pub mod theme;

// Re-export commonly used types
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SessionVault};
pub use api::ApiClient;
pub use auth::{AuthOutcome, AuthState, SessionStore};
pub use forms::{FormPhase, LoginForm, RegisterForm};
pub use state::AppState;
