//! The published session state.

use crate::profile::UserProfile;

/// Opaque bearer credential issued by the backend.
pub type AuthToken = String;

/// Immutable view of the session, published whole on every transition.
///
/// The credential and profile are either both present or both absent: the
/// fields are private and only the three lifecycle constructors exist, so no
/// other combination can be built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    token: Option<AuthToken>,
    profile: Option<UserProfile>,
    ready: bool,
}

impl SessionSnapshot {
    /// State before the initial restore attempt has completed.
    #[must_use]
    pub fn initializing() -> Self {
        Self::default()
    }

    /// Ready with no credential.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            token: None,
            profile: None,
            ready: true,
        }
    }

    /// Ready with an adopted credential and profile.
    #[must_use]
    pub fn authenticated(token: AuthToken, profile: UserProfile) -> Self {
        Self {
            token: Some(token),
            profile: Some(profile),
            ready: true,
        }
    }

    /// Whether the initial restore attempt has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether a credential is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "1".to_string(),
            email: "nina@example.com".to_string(),
            username: "nina".to_string(),
            first_name: "Nina".to_string(),
            last_name: "Reed".to_string(),
            is_admin: false,
            is_active: true,
        }
    }

    #[test]
    fn test_initializing_is_not_ready() {
        let snapshot = SessionSnapshot::initializing();
        assert!(!snapshot.is_ready());
        assert!(!snapshot.is_authenticated());
    }

    #[test]
    fn test_token_present_iff_profile_present() {
        for snapshot in [
            SessionSnapshot::initializing(),
            SessionSnapshot::anonymous(),
            SessionSnapshot::authenticated("abc".to_string(), profile()),
        ] {
            assert_eq!(snapshot.token().is_some(), snapshot.profile().is_some());
        }
    }

    #[test]
    fn test_authenticated_snapshot() {
        let snapshot = SessionSnapshot::authenticated("abc".to_string(), profile());
        assert!(snapshot.is_ready());
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.token(), Some("abc"));
        assert_eq!(snapshot.profile().unwrap().username, "nina");
    }
}
