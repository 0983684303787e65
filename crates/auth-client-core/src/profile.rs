//! User profile mirrored between the backend and durable storage.

use serde::{Deserialize, Serialize};

/// Account data returned by the backend on login and registration.
///
/// Field names on the wire follow the backend schema (`_id`, `firstname`,
/// `lastname`, `admin`, `active`); the two flags default to `false` when the
/// backend omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(rename = "admin", default)]
    pub is_admin: bool,
    #[serde(rename = "active", default)]
    pub is_active: bool,
}
