use sqlx::SqliteConnection;
use uuid::Uuid;
use crate::db::models::{User, UserDraft};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Insert a new standard user. A concurrent insert that wins the race on
    /// username or email surfaces as the matching sign-up conflict.
    pub async fn create(
        conn: &mut SqliteConnection,
        draft: &UserDraft,
        password_hash: &[u8; 32],
        password_salt: &[u8; 32],
    ) -> Result<User, AppError> {
        let uuid = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (uuid, username, email, password_hash, password_salt, role,
                   first_name, last_name, country, about_me, dob, contact_number, created_at)
VALUES (?, ?, ?, ?, ?, 'standard', ?, ?, ?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&uuid)
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(password_hash.as_slice())
        .bind(password_salt.as_slice())
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.country)
        .bind(&draft.about_me)
        .bind(&draft.dob)
        .bind(&draft.contact_number)
        .bind(created_at)
        .fetch_one(conn)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    pub async fn get_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    pub async fn get_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    pub async fn get_by_uuid(
        conn: &mut SqliteConnection,
        uuid: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE uuid = ?"
        )
        .bind(uuid)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    pub async fn get_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Returns the number of rows removed. Sessions, questions and answers
    /// owned by the user cascade.
    pub async fn delete_by_uuid(
        conn: &mut SqliteConnection,
        uuid: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE uuid = ?")
            .bind(uuid)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("users.username") {
                return AppError::UsernameTaken;
            }
            if message.contains("users.email") {
                return AppError::EmailTaken;
            }
        }
    }
    AppError::Database(err)
}
