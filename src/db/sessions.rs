use sqlx::SqliteConnection;
use uuid::Uuid;
use crate::db::models::Session;
use crate::error::AppError;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        access_token: &str,
        login_at: i64,
        expires_at: i64,
    ) -> Result<Session, AppError> {
        let uuid = Uuid::new_v4().to_string();

        let session = sqlx::query_as::<_, Session>(
            r#"
INSERT INTO sessions (uuid, user_id, access_token, login_at, expires_at, logout_at)
VALUES (?, ?, ?, ?, ?, NULL)
RETURNING *
            "#,
        )
        .bind(&uuid)
        .bind(user_id)
        .bind(access_token)
        .bind(login_at)
        .bind(expires_at)
        .fetch_one(conn)
        .await?;

        Ok(session)
    }

    /// Looks a session up regardless of expiry or logout state; callers decide
    /// what those mean.
    pub async fn get_by_token(
        conn: &mut SqliteConnection,
        token: &str,
    ) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE access_token = ?"
        )
        .bind(token)
        .fetch_optional(conn)
        .await?;

        Ok(session)
    }

    /// Sets `logout_at`. Overwrites an earlier logout time; there is no path
    /// that clears it.
    pub async fn mark_logged_out(
        conn: &mut SqliteConnection,
        token: &str,
        at: i64,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET logout_at = ? WHERE access_token = ?")
            .bind(at)
            .bind(token)
            .execute(conn)
            .await?;

        Ok(())
    }
}
