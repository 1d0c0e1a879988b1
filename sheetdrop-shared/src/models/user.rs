//! User accounts and the admin listing/CRUD payloads.

use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use super::Timestamp;

/// Global role assignments for a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Canonical string representation used by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err("unknown user role"),
        }
    }
}

/// The one internal user shape.
///
/// Backend revisions disagree on the wire format (numeric vs. string ids,
/// flat vs. structured login payloads); all of that is adapted at the API
/// boundary so the rest of the application only ever sees this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// Unique identifier, normalized to a string.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Role driving route gating.
    #[serde(default)]
    pub role: UserRole,

    /// When the account was created, if the backend reported it.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl AuthUser {
    /// Whether this user may manage other user accounts.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Raw user row as the backend serves it.
///
/// Ids arrive as JSON numbers in some revisions and strings in others, and
/// the role field is sometimes absent.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Identifier, normalized to a string whatever the wire type.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role, when the backend reports one.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Account creation time, when reported.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl From<UserRecord> for AuthUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            role: record.role.unwrap_or_default(),
            created_at: record.created_at,
        }
    }
}

/// Envelope returned by `GET /user/list`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserListReply {
    /// The requested page of user rows.
    pub data: Vec<UserRecord>,
    /// Total matching accounts across all pages.
    pub total: u64,
    /// Echoed page index.
    #[serde(default)]
    pub page: u32,
    /// Echoed page size.
    #[serde(default)]
    pub size: u32,
}

/// Request to create a new user account.
///
/// The backend does not accept a role on creation; new accounts start as
/// plain users and get promoted out of band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Partial update of an existing user. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpdateUserRequest {
    /// Which account to update.
    pub id: String,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password; `None` keeps the current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Sort direction for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire spelling of the direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query parameters for `GET /user/list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListQuery {
    /// Zero-based page index.
    pub page: u32,
    /// Rows per page.
    pub size: u32,
    /// Column the backend sorts on.
    pub order_by: String,
    /// Sort direction.
    pub order: SortOrder,
    /// Free-text filter over name and email.
    pub filter: Option<String>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 100,
            order_by: "id".to_string(),
            order: SortOrder::Asc,
            filter: None,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) => value.to_string(),
        Raw::Text(value) => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::User] {
            let parsed: UserRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let parsed: UserRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, UserRole::User);
    }

    #[test]
    fn test_record_with_numeric_id() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id": 7, "name": "Ana", "email": "ana@example.com", "role": "admin"}"#,
        )
        .unwrap();

        assert_eq!(record.id, "7");
        let user = AuthUser::from(record);
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_admin());
    }

    #[test]
    fn test_record_with_string_id_and_missing_role() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id": "42", "name": "Luis", "email": "luis@example.com"}"#,
        )
        .unwrap();

        assert_eq!(record.id, "42");
        let user = AuthUser::from(record);
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_list_reply_envelope() {
        let reply: UserListReply = serde_json::from_str(
            r#"{
                "data": [
                    {"id": 1, "name": "Ana", "email": "ana@example.com", "created_at": "2025-01-02T10:00:00Z"},
                    {"id": "2", "name": "Luis", "email": "luis@example.com"}
                ],
                "total": 2,
                "page": 0,
                "size": 100
            }"#,
        )
        .unwrap();

        assert_eq!(reply.total, 2);
        assert_eq!(reply.data.len(), 2);
        assert!(reply.data[0].created_at.is_some());
        assert!(reply.data[1].created_at.is_none());
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let request = UpdateUserRequest {
            id: "3".to_string(),
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains("\"name\""));
        assert!(!json.contains("\"password\""));
        assert!(!json.contains("\"role\""));
    }

    #[test]
    fn test_list_query_defaults() {
        let query = UserListQuery::default();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 100);
        assert_eq!(query.order_by, "id");
        assert_eq!(query.order.as_str(), "ASC");
        assert!(query.filter.is_none());
    }
}
