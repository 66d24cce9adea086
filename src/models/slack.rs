//! Response shapes for the integration endpoints.
//!
//! All of these are transient: built per request from Slack's REST responses
//! and never stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GET /authorize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub authorization_url: String,
}

/// GET /post-authorize
///
/// `protected_data` is Slack's `authed_user` object and `metadata` the `team`
/// object, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAuthorizeResponse {
    pub protected_data: Value,
    pub consent_user: String,
    pub metadata: Value,
    pub access_token: String,
}

/// Name parts of a directory entry; field names follow the upstream
/// directory-record convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserName {
    #[serde(rename = "givenName")]
    pub given_name: Option<String>,
    #[serde(rename = "familyName")]
    pub family_name: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

/// Avatar pointer for a directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub file_name: Option<String>,
}

/// Normalized directory entry derived from a `users.list` member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub primary_email: Option<String>,
    pub is_admin: Option<bool>,
    pub name: UserName,
    pub user_photo: FileRef,
}

impl UserRecord {
    /// Maps one raw `members[]` entry to the normalized record.
    pub fn from_member(member: &Value) -> Self {
        let profile = member.get("profile").cloned().unwrap_or(Value::Null);
        let get_str =
            |v: &Value, key: &str| v.get(key).and_then(|s| s.as_str()).map(|s| s.to_string());

        Self {
            org_id: get_str(member, "team_id"),
            user_id: get_str(member, "id"),
            primary_email: get_str(&profile, "email"),
            is_admin: member.get("is_admin").and_then(|v| v.as_bool()),
            name: UserName {
                given_name: get_str(&profile, "first_name"),
                family_name: get_str(&profile, "last_name"),
                full_name: get_str(&profile, "real_name"),
            },
            user_photo: FileRef {
                file_name: get_str(&profile, "image_24"),
            },
        }
    }
}

/// GET /get-users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPageResponse {
    pub users: Vec<UserRecord>,
    pub page_token: Option<String>,
    pub next_page_token: Option<String>,
}

/// GET /get-apps/:org_id (stub; listing apps needs an admin-scoped app)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppsResponse {
    pub apps: Vec<Value>,
}

/// GET /verify-connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConnectionResponse {
    pub connection_verified: bool,
}

/// POST /slack-events ack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAck {
    pub ok: bool,
}
