//! Shared credential cell for outgoing requests.

use std::sync::{Arc, RwLock};

use crate::session::AuthToken;

/// Cloneable handle to the credential attached to outgoing requests.
///
/// The session manager is the only writer; any number of request builders
/// read it. Absence means the authorization header is omitted entirely.
#[derive(Debug, Clone, Default)]
pub struct BearerToken {
    inner: Arc<RwLock<Option<AuthToken>>>,
}

impl BearerToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<AuthToken> {
        self.inner.read().unwrap().clone()
    }

    pub fn set(&self, token: AuthToken) {
        *self.inner.write().unwrap() = Some(token);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_across_clones() {
        let bearer = BearerToken::new();
        let reader = bearer.clone();
        assert_eq!(reader.get(), None);

        bearer.set("xyz".to_string());
        assert_eq!(reader.get(), Some("xyz".to_string()));

        bearer.clear();
        assert_eq!(reader.get(), None);
    }
}
