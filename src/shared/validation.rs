//! Client-side form checks
//!
//! Conveniences only. The backend is the authority and can still reject a
//! request that passes here.

use thiserror::Error;

/// Email suffixes accepted by the register form (case-sensitive).
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["@jadeglobal.com", "@kanverse.com"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("All fields are required")]
    MissingFields,

    #[error("Email must belong to jadeglobal.com or kanverse.com domain")]
    EmailDomain,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub fn has_allowed_domain(email: &str) -> bool {
    ALLOWED_EMAIL_DOMAINS
        .iter()
        .any(|domain| email.ends_with(domain))
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Checks run in order: required fields, email domain, password confirmation.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if [name, email, password, confirm_password]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ValidationError::MissingFields);
    }
    if !has_allowed_domain(email) {
        return Err(ValidationError::EmailDomain);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domains() {
        assert!(has_allowed_domain("user@jadeglobal.com"));
        assert!(has_allowed_domain("user@kanverse.com"));
        assert!(!has_allowed_domain("user@otherdomain.com"));
    }

    #[test]
    fn test_domain_match_is_case_sensitive_suffix() {
        assert!(!has_allowed_domain("user@JadeGlobal.com"));
        assert!(!has_allowed_domain("user@jadeglobal.com.evil.io"));
        assert!(!has_allowed_domain("jadeglobal.com"));
    }

    #[test]
    fn test_registration_checks_domain_before_passwords() {
        let result = validate_registration("A", "user@otherdomain.com", "a", "b");
        assert_eq!(result, Err(ValidationError::EmailDomain));
    }

    #[test]
    fn test_registration_password_mismatch() {
        let result = validate_registration("A", "user@kanverse.com", "a", "b");
        assert_eq!(result, Err(ValidationError::PasswordMismatch));
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_registration_requires_every_field() {
        let result = validate_registration("", "user@kanverse.com", "a", "a");
        assert_eq!(result, Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(
            validate_login("user@kanverse.com", ""),
            Err(ValidationError::MissingCredentials)
        );
        assert!(validate_login("user@kanverse.com", "secret").is_ok());
    }
}
