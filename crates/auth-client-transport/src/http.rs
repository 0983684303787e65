//! HTTP implementation of the authentication transport.

use std::time::Duration;

use async_trait::async_trait;
use auth_client_core::{
    BearerToken,
    traits::{AuthGrant, AuthTransport, LoginCredentials, Registration, TransportError},
};
use reqwest::Method;
use serde::Serialize;

use crate::protocol::{ErrorBody, LOGIN_PATH, REGISTER_PATH};

/// Per-request timeout. The session manager imposes none of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication transport over HTTP.
///
/// Cloneable handle; clones share the connection pool and the bearer cell.
/// Requests built through [`request`](Self::request) carry
/// `Authorization: Bearer <token>` while a credential exists and no
/// authorization header at all while one does not.
#[derive(Debug, Clone)]
pub struct HttpAuthTransport {
    base_url: String,
    http: reqwest::Client,
    bearer: BearerToken,
}

impl HttpAuthTransport {
    /// Create a transport against `base_url` (trailing slashes are ignored).
    ///
    /// # Errors
    /// Returns error if the HTTP client could not be constructed.
    pub fn new(base_url: impl Into<String>, bearer: BearerToken) -> Result<Self, TransportError> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(Self {
            base_url,
            http,
            bearer,
        })
    }

    /// Builder for any endpoint under the base URL, with the current
    /// credential attached.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match self.bearer.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn submit<B>(&self, path: &str, body: &B) -> Result<AuthGrant, TransportError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<AuthGrant>()
                .await
                .map_err(|err| TransportError::Malformed(err.to_string()))
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            tracing::debug!(status = status.as_u16(), path, "authentication request rejected");
            Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, TransportError> {
        self.submit(LOGIN_PATH, credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, TransportError> {
        self.submit(REGISTER_PATH, registration).await
    }
}
