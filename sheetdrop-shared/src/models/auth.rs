//! Authentication requests, replies, and the persisted session unit.

use serde::{Deserialize, Serialize};

use super::user::{AuthUser, UserRole};

/// Credentials for `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Plain-text password; only ever sent over the wire, never stored.
    pub password: String,
}

/// Payload for self-registration via `POST /user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Display name for the new account.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// The persisted authentication unit: token and user travel together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Bearer token attached to authenticated requests.
    pub token: String,
    /// The user the token belongs to.
    pub user: AuthUser,
}

/// The `user` field of a login reply, which older backend revisions serve
/// as a bare display name instead of a structured object.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LoginUser {
    Structured(AuthUser),
    Name(String),
}

/// Raw reply from `POST /token`.
///
/// Two observed shapes: a structured user object, or a flat payload where
/// `user` is the display name and `email`/`role` sit at the top level. Both
/// reduce to a [`Session`]. Errors come back in-band as
/// `{ "error": true, "message": ... }`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginReply {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl LoginReply {
    /// Adapt the wire reply to the canonical session shape.
    ///
    /// The flat variant carries no id; it stays empty until the follow-up
    /// `GET /user` resolves the full record.
    pub fn into_session(self) -> Result<Session, String> {
        if self.error {
            return Err(self
                .message
                .unwrap_or_else(|| "Login was rejected by the server".to_string()));
        }
        let token = self
            .token
            .ok_or_else(|| "Login reply did not include a token".to_string())?;

        let user = match self.user {
            Some(LoginUser::Structured(user)) => user,
            Some(LoginUser::Name(name)) => AuthUser {
                id: String::new(),
                name,
                email: self.email.unwrap_or_default(),
                role: self.role.unwrap_or_default(),
                created_at: None,
            },
            None => return Err("Login reply did not include a user".to_string()),
        };

        Ok(Session { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_reply() {
        let reply: LoginReply = serde_json::from_str(
            r#"{
                "token": "abc123",
                "user": {"id": "9", "name": "Ana", "email": "ana@example.com", "role": "admin"}
            }"#,
        )
        .unwrap();
        let session = reply.into_session().unwrap();

        assert_eq!(session.token, "abc123");
        assert_eq!(session.user.id, "9");
        assert_eq!(session.user.role, UserRole::Admin);
    }

    #[test]
    fn test_flat_reply() {
        let reply: LoginReply = serde_json::from_str(
            r#"{"token": "t0k", "user": "Luis", "email": "luis@example.com", "role": "user"}"#,
        )
        .unwrap();
        let session = reply.into_session().unwrap();

        assert_eq!(session.token, "t0k");
        assert_eq!(session.user.id, "");
        assert_eq!(session.user.name, "Luis");
        assert_eq!(session.user.email, "luis@example.com");
        assert_eq!(session.user.role, UserRole::User);
    }

    #[test]
    fn test_error_reply_uses_backend_message() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"error": true, "message": "Bad credentials"}"#).unwrap();

        assert_eq!(reply.into_session().unwrap_err(), "Bad credentials");
    }

    #[test]
    fn test_error_reply_without_message() {
        let reply: LoginReply = serde_json::from_str(r#"{"error": true}"#).unwrap();

        assert!(reply.into_session().is_err());
    }

    #[test]
    fn test_reply_missing_token() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"user": "Ana", "email": "a@b.c"}"#).unwrap();

        assert!(reply.into_session().unwrap_err().contains("token"));
    }

    #[test]
    fn test_session_round_trip() {
        let session = Session {
            token: "tok".to_string(),
            user: AuthUser {
                id: "1".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                role: UserRole::Admin,
                created_at: None,
            },
        };
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(session, restored);
    }
}
