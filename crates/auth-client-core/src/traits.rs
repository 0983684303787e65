//! Contracts between the session manager and its collaborators.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::UserProfile;
use crate::session::AuthToken;

/// Storage key for the bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized profile.
pub const PROFILE_KEY: &str = "user";

/// Every key the session layer owns.
pub const SESSION_KEYS: [&str; 2] = [TOKEN_KEY, PROFILE_KEY];

/// Sign-in form data.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    /// Account identifier (the sign-in form's email field).
    pub identifier: String,
    /// Account secret.
    pub secret: String,
}

/// Sign-up form data. A successful registration also signs the user in.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub secret: String,
}

/// Successful response of both remote authentication operations.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub token: AuthToken,
    pub user: UserProfile,
}

/// Storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Internal(String),
}

/// Transport error.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The backend answered with a non-success status. Carries the error
    /// body's `message` field when one was present.
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { status: u16, message: Option<String> },
    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),
    /// A success status whose body did not decode.
    #[error("malformed server response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// The backend's verbatim error message, when one was surfaced.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Malformed(_) => None,
        }
    }
}

/// Trait for durable key-value session storage.
///
/// Values survive process restarts. The session manager is the only writer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. Absent keys are `Ok(None)`.
    ///
    /// # Errors
    /// Returns error if the backing storage is unreadable.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns error if the value could not be durably written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove every listed key. Best-effort: callers treat this as
    /// infallible, implementations swallow and log failures.
    async fn remove_all(&self, keys: &[&str]);
}

/// Trait for the remote authentication operations.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Exchange credentials for a session grant.
    ///
    /// # Errors
    /// Returns error if the backend rejects the credentials or is unreachable.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, TransportError>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    /// Returns error if the backend rejects the registration or is unreachable.
    async fn register(&self, registration: &Registration) -> Result<AuthGrant, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_field_names() {
        let credentials = LoginCredentials {
            identifier: "a@b.com".to_string(),
            secret: "hunter22".to_string(),
        };
        let json = serde_json::to_string(&credentials).unwrap();
        assert!(json.contains("\"identifier\":\"a@b.com\""));
        assert!(json.contains("\"secret\""));
    }

    #[test]
    fn test_registration_payload_field_names() {
        let registration = Registration {
            email: "a@b.com".to_string(),
            username: "nina".to_string(),
            first_name: "Nina".to_string(),
            last_name: "Reed".to_string(),
            secret: "hunter22".to_string(),
        };
        let json = serde_json::to_string(&registration).unwrap();
        assert!(json.contains("\"firstname\":\"Nina\""));
        assert!(json.contains("\"lastname\":\"Reed\""));
    }

    #[test]
    fn test_grant_decodes_wire_shape() {
        let json = r#"{
            "token": "xyz",
            "user": {
                "_id": "1",
                "email": "nina@example.com",
                "username": "nina",
                "firstname": "Nina",
                "lastname": "Reed",
                "admin": false,
                "active": true
            }
        }"#;

        let grant: AuthGrant = serde_json::from_str(json).unwrap();
        assert_eq!(grant.token, "xyz");
        assert_eq!(grant.user.username, "nina");
    }

    #[test]
    fn test_rejection_message_falls_through() {
        let rejected = TransportError::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(rejected.server_message(), Some("Invalid credentials"));
        assert_eq!(rejected.to_string(), "Invalid credentials");

        let silent = TransportError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(silent.server_message(), None);

        let network = TransportError::Network("connection refused".to_string());
        assert_eq!(network.server_message(), None);
    }
}
