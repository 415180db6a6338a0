use sqlx::SqliteConnection;
use uuid::Uuid;
use crate::db::models::Answer;
use crate::error::AppError;

pub struct AnswerRepository;

impl AnswerRepository {
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        question_id: i64,
        answer: &str,
    ) -> Result<Answer, AppError> {
        let uuid = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();

        let answer = sqlx::query_as::<_, Answer>(
            r#"
INSERT INTO answers (uuid, answer, user_id, question_id, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&uuid)
        .bind(answer)
        .bind(user_id)
        .bind(question_id)
        .bind(created_at)
        .fetch_one(conn)
        .await?;

        Ok(answer)
    }

    pub async fn get_by_uuid(
        conn: &mut SqliteConnection,
        uuid: &str,
    ) -> Result<Option<Answer>, AppError> {
        let answer = sqlx::query_as::<_, Answer>(
            "SELECT * FROM answers WHERE uuid = ?"
        )
        .bind(uuid)
        .fetch_optional(conn)
        .await?;

        Ok(answer)
    }

    pub async fn update_text(
        conn: &mut SqliteConnection,
        id: i64,
        answer: &str,
    ) -> Result<Answer, AppError> {
        let answer = sqlx::query_as::<_, Answer>(
            "UPDATE answers SET answer = ? WHERE id = ? RETURNING *"
        )
        .bind(answer)
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(answer)
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM answers WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn get_all_by_question(
        conn: &mut SqliteConnection,
        question_id: i64,
    ) -> Result<Vec<Answer>, AppError> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT * FROM answers WHERE question_id = ? ORDER BY id ASC"
        )
        .bind(question_id)
        .fetch_all(conn)
        .await?;

        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{QuestionRepository, UserRepository};
    use crate::test_support::{draft, test_pool};

    #[tokio::test]
    async fn test_answers_follow_their_question() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let user = UserRepository::create(&mut conn, &draft("alice"), &[0u8; 32], &[0u8; 32])
            .await
            .unwrap();
        let q1 = QuestionRepository::create(&mut conn, user.id, "q1").await.unwrap();
        let q2 = QuestionRepository::create(&mut conn, user.id, "q2").await.unwrap();

        let a1 = AnswerRepository::create(&mut conn, user.id, q1.id, "a1").await.unwrap();
        AnswerRepository::create(&mut conn, user.id, q2.id, "a2").await.unwrap();

        let for_q1 = AnswerRepository::get_all_by_question(&mut conn, q1.id).await.unwrap();
        assert_eq!(for_q1.len(), 1);
        assert_eq!(for_q1[0].uuid, a1.uuid);

        let edited = AnswerRepository::update_text(&mut conn, a1.id, "a1 edited").await.unwrap();
        assert_eq!(edited.question_id, q1.id);
        assert_eq!(edited.user_id, user.id);

        // Deleting the question takes its answers with it.
        QuestionRepository::delete(&mut conn, q1.id).await.unwrap();
        assert!(AnswerRepository::get_by_uuid(&mut conn, &a1.uuid).await.unwrap().is_none());
    }
}
