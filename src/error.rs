use axum::http::StatusCode;
use thiserror::Error;

use crate::service::access::Requirement;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("User has not signed in")]
    NotSignedIn,

    #[error("User is signed out. Sign in first to {0}")]
    SignedOut(&'static str),

    #[error("Session has expired. Sign in again to {0}")]
    SessionExpired(&'static str),

    #[error("{}", forbidden_message(.required, .resource, .action))]
    Forbidden {
        required: Requirement,
        resource: &'static str,
        action: &'static str,
    },

    #[error("Entered question uuid does not exist")]
    QuestionNotFound,

    #[error("Entered answer uuid does not exist")]
    AnswerNotFound,

    #[error("User with entered uuid does not exist")]
    UserNotFound,

    #[error("Try any other Username, this Username has already been taken")]
    UsernameTaken,

    #[error("This user has already been registered, try with any other emailId")]
    EmailTaken,

    #[error("This username does not exist")]
    UnknownUsername,

    #[error("Password failed")]
    WrongPassword,

    #[error("User is not Signed in")]
    NotSignedInForSignOut,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotSignedIn => "ATHR-001",
            AppError::SignedOut(_) => "ATHR-002",
            AppError::Forbidden { .. } => "ATHR-003",
            AppError::SessionExpired(_) => "ATHR-004",
            AppError::QuestionNotFound => "QUES-001",
            AppError::AnswerNotFound => "ANS-001",
            AppError::UserNotFound => "USR-001",
            AppError::UsernameTaken => "SGR-001",
            AppError::EmailTaken => "SGR-002",
            AppError::NotSignedInForSignOut => "SGR-003",
            AppError::UnknownUsername => "ATH-001",
            AppError::WrongPassword => "ATH-002",
            AppError::BadRequest(_) => "REQ-001",
            AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => "GEN-001",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotSignedIn
            | AppError::SignedOut(_)
            | AppError::SessionExpired(_)
            | AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::QuestionNotFound | AppError::AnswerNotFound | AppError::UserNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::UsernameTaken | AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::UnknownUsername
            | AppError::WrongPassword
            | AppError::NotSignedInForSignOut => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Crypto(_)
            | AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

fn forbidden_message(required: &Requirement, resource: &str, action: &str) -> String {
    match required {
        Requirement::Owner => format!("Only the {} owner can {}", resource, action),
        Requirement::OwnerOrAdmin => format!("Only the {} owner or admin can {}", resource, action),
        Requirement::Admin => "Unauthorized Access, Entered user is not an admin".to_string(),
    }
}

// Axum IntoResponse implementation for HTTP errors
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
