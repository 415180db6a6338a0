use sqlx::SqliteConnection;
use uuid::Uuid;
use crate::db::models::Question;
use crate::error::AppError;

pub struct QuestionRepository;

impl QuestionRepository {
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        content: &str,
    ) -> Result<Question, AppError> {
        let uuid = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let question = sqlx::query_as::<_, Question>(
            r#"
INSERT INTO questions (uuid, content, user_id, created_at)
VALUES (?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&uuid)
        .bind(content)
        .bind(user_id)
        .bind(created_at)
        .fetch_one(conn)
        .await?;

        Ok(question)
    }

    pub async fn get_by_uuid(
        conn: &mut SqliteConnection,
        uuid: &str,
    ) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE uuid = ?"
        )
        .bind(uuid)
        .fetch_optional(conn)
        .await?;

        Ok(question)
    }

    /// Only the content changes; owner and creation time are left alone.
    pub async fn update_content(
        conn: &mut SqliteConnection,
        id: i64,
        content: &str,
    ) -> Result<Question, AppError> {
        let question = sqlx::query_as::<_, Question>(
            "UPDATE questions SET content = ? WHERE id = ? RETURNING *"
        )
        .bind(content)
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(question)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions ORDER BY id ASC"
        )
        .fetch_all(conn)
        .await?;

        Ok(questions)
    }

    pub async fn get_all_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE user_id = ? ORDER BY id ASC"
        )
        .bind(user_id)
        .fetch_all(conn)
        .await?;

        Ok(questions)
    }
}
