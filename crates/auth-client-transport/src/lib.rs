//! HTTP transport for the client authentication layer.
//!
//! Provides:
//! - Wire payloads for the authentication endpoints
//! - `HttpAuthTransport` - reqwest-backed implementation of `AuthTransport`

pub mod http;
pub mod protocol;

pub use http::HttpAuthTransport;
