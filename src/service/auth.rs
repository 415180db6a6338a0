use std::sync::Arc;

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::crypto::{generate_salt, hash_password, verify_password, TokenIssuer};
use crate::db::{Session, SessionRepository, User, UserDraft, UserRepository};
use crate::error::AppError;

/// A user verified through an active session.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: User,
    pub session: Session,
}

/// Sessions move from active to signed out and never back. Expiry is only
/// checked when `enforce_expiry` is set.
#[derive(Clone)]
pub struct Authenticator {
    db: Pool<Sqlite>,
    issuer: Arc<TokenIssuer>,
    session_ttl_secs: i64,
    enforce_expiry: bool,
}

impl Authenticator {
    pub fn new(
        db: Pool<Sqlite>,
        issuer: Arc<TokenIssuer>,
        session_expiry_hours: i64,
        enforce_expiry: bool,
    ) -> Self {
        Self {
            db,
            issuer,
            session_ttl_secs: session_expiry_hours.saturating_mul(3600),
            enforce_expiry,
        }
    }

    /// Username uniqueness is checked before email, so a draft colliding on
    /// both reports `UsernameTaken`.
    pub async fn sign_up(&self, draft: &UserDraft) -> Result<User, AppError> {
        let mut tx = self.db.begin().await?;

        if UserRepository::get_by_username(&mut tx, &draft.username).await?.is_some() {
            return Err(AppError::UsernameTaken);
        }
        if UserRepository::get_by_email(&mut tx, &draft.email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let salt = generate_salt();
        let password_hash = hash_password(&draft.password, &salt)?;
        let user = UserRepository::create(&mut tx, draft, &password_hash, &salt).await?;

        tx.commit().await?;
        tracing::info!(user = %user.uuid, username = %user.username, "user signed up");
        Ok(user)
    }

    /// On success the new session is persisted and returned with its user.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        let mut tx = self.db.begin().await?;

        // Get user by username
        let user = UserRepository::get_by_username(&mut tx, username)
            .await?
            .ok_or(AppError::UnknownUsername)?;

        // Verify password
        if !verify_password(password, &user.password_hash, &user.password_salt)? {
            tracing::debug!(user = %user.uuid, "sign-in rejected: wrong password");
            return Err(AppError::WrongPassword);
        }

        // Create session
        let login_at = chrono::Utc::now().timestamp();
        let expires_at = login_at.saturating_add(self.session_ttl_secs);
        let token = self.issuer.issue(&user.uuid, login_at, expires_at)?;
        let session =
            SessionRepository::create(&mut tx, user.id, &token, login_at, expires_at).await?;

        tx.commit().await?;
        tracing::info!(user = %user.uuid, session = %session.uuid, "user signed in");
        Ok(Principal { user, session })
    }

    /// Signing out an already signed-out session succeeds again and moves
    /// `logout_at` forward.
    pub async fn sign_out(&self, token: &str) -> Result<String, AppError> {
        let mut tx = self.db.begin().await?;

        let session = SessionRepository::get_by_token(&mut tx, token)
            .await?
            .ok_or(AppError::NotSignedInForSignOut)?;
        let user = UserRepository::get_by_id(&mut tx, session.user_id)
            .await?
            .ok_or_else(|| AppError::Internal("Session owner not found".to_string()))?;

        let now = chrono::Utc::now().timestamp();
        SessionRepository::mark_logged_out(&mut tx, token, now).await?;

        tx.commit().await?;
        tracing::info!(user = %user.uuid, session = %session.uuid, "user signed out");
        Ok(user.uuid)
    }

    /// Resolve a bearer token to a principal on the caller's connection, so the
    /// lookup shares the caller's transaction. `action` names what the caller
    /// was trying to do and ends up in the signed-out message.
    pub async fn resolve(
        &self,
        conn: &mut SqliteConnection,
        token: &str,
        action: &'static str,
    ) -> Result<Principal, AppError> {
        let session = SessionRepository::get_by_token(&mut *conn, token)
            .await?
            .ok_or(AppError::NotSignedIn)?;

        if session.is_signed_out() {
            return Err(AppError::SignedOut(action));
        }
        if self.enforce_expiry && session.is_expired_at(chrono::Utc::now().timestamp()) {
            return Err(AppError::SessionExpired(action));
        }

        let user = UserRepository::get_by_id(&mut *conn, session.user_id)
            .await?
            .ok_or(AppError::NotSignedIn)?;

        Ok(Principal { user, session })
    }
}
