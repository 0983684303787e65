//! Core abstractions for client session/authentication state.
//!
//! This crate provides the fundamental building blocks:
//! - `SessionSnapshot` - The published session state, replaced whole on every transition
//! - `UserProfile` - Account data mirrored into durable storage
//! - `BearerToken` - Shared credential cell read by outgoing requests
//! - Storage and Transport traits

pub mod bearer;
pub mod profile;
pub mod session;
pub mod traits;

pub use bearer::BearerToken;
pub use profile::UserProfile;
pub use session::{AuthToken, SessionSnapshot};
pub use traits::{AuthTransport, SessionStore};
