use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::db::{AnswerRepository, QuestionRepository};
use crate::error::AppError;
use crate::service::access::{require_owner, require_owner_or_admin};
use crate::service::auth::Authenticator;
use crate::service::{Outcome, ANSWER_CREATED, ANSWER_DELETED, ANSWER_EDITED};

/// An answer as listed under its question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetails {
    pub id: String,
    pub answer_content: String,
    pub question_content: String,
}

#[derive(Clone)]
pub struct AnswerService {
    db: Pool<Sqlite>,
    auth: Authenticator,
}

impl AnswerService {
    pub fn new(db: Pool<Sqlite>, auth: Authenticator) -> Self {
        Self { db, auth }
    }

    pub async fn create(
        &self,
        token: &str,
        question_uuid: &str,
        text: &str,
    ) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "post an answer").await?;

        let question = QuestionRepository::get_by_uuid(&mut tx, question_uuid)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        let answer = AnswerRepository::create(&mut tx, principal.user.id, question.id, text).await?;

        tx.commit().await?;
        tracing::info!(answer = %answer.uuid, question = %question.uuid, "answer created");
        Ok(Outcome::new(answer.uuid, ANSWER_CREATED))
    }

    pub async fn edit(&self, token: &str, answer_uuid: &str, text: &str) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "edit an answer").await?;

        let answer = AnswerRepository::get_by_uuid(&mut tx, answer_uuid)
            .await?
            .ok_or(AppError::AnswerNotFound)?;
        require_owner(&principal, &answer, "edit the answer")?;

        let answer = AnswerRepository::update_text(&mut tx, answer.id, text).await?;

        tx.commit().await?;
        tracing::info!(answer = %answer.uuid, "answer edited");
        Ok(Outcome::new(answer.uuid, ANSWER_EDITED))
    }

    pub async fn delete(&self, token: &str, answer_uuid: &str) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "delete an answer").await?;

        let answer = AnswerRepository::get_by_uuid(&mut tx, answer_uuid)
            .await?
            .ok_or(AppError::AnswerNotFound)?;
        require_owner_or_admin(&principal, &answer, "delete the answer")?;

        AnswerRepository::delete(&mut tx, answer.id).await?;

        tx.commit().await?;
        tracing::info!(answer = %answer.uuid, by = %principal.user.uuid, "answer deleted");
        Ok(Outcome::new(answer.uuid, ANSWER_DELETED))
    }

    pub async fn list_by_question(
        &self,
        token: &str,
        question_uuid: &str,
    ) -> Result<Vec<AnswerDetails>, AppError> {
        let mut tx = self.db.begin().await?;
        self.auth
            .resolve(&mut tx, token, "get all answers to a question")
            .await?;

        let question = QuestionRepository::get_by_uuid(&mut tx, question_uuid)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        let answers = AnswerRepository::get_all_by_question(&mut tx, question.id).await?;

        tx.commit().await?;
        Ok(answers
            .into_iter()
            .map(|answer| AnswerDetails {
                id: answer.uuid,
                answer_content: answer.answer,
                question_content: question.content.clone(),
            })
            .collect())
    }
}
