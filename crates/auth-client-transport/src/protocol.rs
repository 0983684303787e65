//! Wire shapes for the authentication endpoints.
//!
//! The request payloads and the success body (`AuthGrant`) live in
//! `auth-client-core`; this module holds what only the HTTP layer sees.

use serde::Deserialize;

/// Sign-in endpoint, joined onto the transport's base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Sign-up endpoint.
pub const REGISTER_PATH: &str = "/auth/register";

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human-readable explanation, surfaced verbatim to the user.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_with_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }

    #[test]
    fn test_error_body_ignores_extra_fields() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"nope","code":"AUTH_401"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("nope"));
    }
}
