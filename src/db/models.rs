use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Standard,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "standard" => Ok(Role::Standard),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(value)),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Vec<u8>,
    #[serde(skip_serializing)]
    pub password_salt: Vec<u8>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: i64,
}

/// Sign-up input. The password is plaintext until the authenticator digests it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(alias = "userName")]
    pub username: String,
    #[serde(alias = "emailAddress")]
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: i64,
    pub uuid: String,
    pub user_id: i64,
    pub access_token: String,
    pub login_at: i64,
    pub expires_at: i64,
    pub logout_at: Option<i64>,
}

impl Session {
    pub fn is_signed_out(&self) -> bool {
        self.logout_at.is_some()
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: String,
    pub content: String,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    #[serde(skip_serializing)]
    pub id: i64,
    pub uuid: String,
    pub answer: String,
    #[serde(skip_serializing)]
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub question_id: i64,
    pub created_at: i64,
}
