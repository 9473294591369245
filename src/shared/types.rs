//! Wire and storage types
//!
//! Request bodies sent to the auth endpoints, the responses they return, and
//! the session pair kept in persistent storage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User attributes returned by the backend, minus the token.
///
/// Attributes this client does not know about are kept in `extra` so the
/// stored record mirrors whatever the backend sent. `id` is left untyped:
/// backends hand out numeric and string ids alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token plus the user it belongs to. Persisted as a pair or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

/// Body of a successful login or register call: `{token, ...userFields}`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: UserRecord,
}

impl From<AuthResponse> for Session {
    fn from(value: AuthResponse) -> Self {
        Self {
            token: value.token,
            user: value.user,
        }
    }
}

impl UserRecord {
    /// Name to greet the user with, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Error payload the backend attaches to rejected requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/user/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_splits_token_from_user() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "abc",
            "id": 1,
            "name": "A",
            "email": "a@jadeglobal.com"
        }))
        .unwrap();

        assert_eq!(response.token, "abc");
        assert_eq!(response.user.id, Some(json!(1)));
        assert!(response.user.extra.is_empty());

        let stored = serde_json::to_value(&response.user).unwrap();
        assert_eq!(
            stored,
            json!({"id": 1, "name": "A", "email": "a@jadeglobal.com"})
        );
    }

    #[test]
    fn test_user_record_keeps_unknown_attributes() {
        let user: UserRecord = serde_json::from_value(json!({
            "name": "Dana",
            "email": "dana@kanverse.com",
            "role": "EMPLOYEE",
            "department": "Finance"
        }))
        .unwrap();

        assert_eq!(user.id, None);
        assert_eq!(user.role.as_deref(), Some("EMPLOYEE"));
        assert_eq!(user.extra.get("department"), Some(&json!("Finance")));
    }

    #[test]
    fn test_user_record_accepts_string_id() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "abc",
            "id": "u-42",
            "name": "A",
            "email": "a@jadeglobal.com"
        }))
        .unwrap();

        assert_eq!(response.user.id, Some(json!("u-42")));
        assert_eq!(
            serde_json::to_value(&response.user).unwrap(),
            json!({"id": "u-42", "name": "A", "email": "a@jadeglobal.com"})
        );
    }

    #[test]
    fn test_user_record_null_name() {
        let user: UserRecord = serde_json::from_value(json!({
            "name": null,
            "email": "a@jadeglobal.com"
        }))
        .unwrap();

        assert_eq!(user.name, None);
        assert_eq!(user.display_name(), "a@jadeglobal.com");
    }

    #[test]
    fn test_missing_name_is_not_invented() {
        let response: AuthResponse =
            serde_json::from_value(json!({"token": "abc", "email": "a@jadeglobal.com"})).unwrap();

        assert_eq!(
            serde_json::to_value(&response.user).unwrap(),
            json!({"email": "a@jadeglobal.com"})
        );
    }

    #[test]
    fn test_error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
