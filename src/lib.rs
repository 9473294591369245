//! authportal - Employee Portal Authentication Client
//!
//! A native desktop front end for the portal backend: login and registration
//! forms, a session token persisted on disk, and an HTTP client that attaches
//! that token to every API request.
//!
//! # Module Structure
//!
//! - **`shared`** - UI-independent types
//!   - Wire and storage types, errors, routes
//!   - Client-side validation and configuration
//!
//! - **`egui_app`** - The client itself
//!   - Persistent storage and the API client
//!   - Session store and form state machines
//!   - egui views and the binary entry point
//!
//! # Session lifecycle
//!
//! A session is created by `login`/`register`, restored from storage at
//! startup, and destroyed by `logout` or by the backend answering 401 to any
//! request. Token and user record are always written and cleared together.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use authportal::egui_app::{Config, MemoryStore, SessionStore};
//! use authportal::shared::PendingRoute;
//!
//! # async fn example() {
//! let redirects = PendingRoute::new();
//! let session = SessionStore::from_config(
//!     &Config::new(),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(redirects.clone()),
//! );
//! session.restore();
//! let outcome = session.login("a@jadeglobal.com", "secret").await;
//! assert!(outcome.is_success() || outcome.message().is_some());
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `thiserror` enums in `shared::error` and `shared::config`
//! - `login`/`register` fold every failure into `AuthOutcome::Failure`

/// Shared types and data structures
pub mod shared;

/// Native desktop client
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
