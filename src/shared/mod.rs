//! Shared Module
//!
//! Types with no UI dependency: wire and storage types, errors, routes,
//! client-side validation and configuration.

/// Wire and storage types
pub mod types;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Routes and the navigation seam
pub mod route;

/// Client-side form checks
pub mod validation;

/// Re-export commonly used types for convenience
pub use types::{AuthResponse, LoginRequest, Profile, RegisterRequest, Session, UserRecord};
pub use error::{ApiError, StorageError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use route::{Navigator, PendingRoute, Route};
pub use validation::ValidationError;
