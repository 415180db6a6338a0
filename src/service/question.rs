use sqlx::{Pool, Sqlite};

use crate::db::{Question, QuestionRepository, UserRepository};
use crate::error::AppError;
use crate::service::access::{require_owner, require_owner_or_admin};
use crate::service::auth::Authenticator;
use crate::service::{Outcome, QUESTION_CREATED, QUESTION_DELETED, QUESTION_EDITED};

#[derive(Clone)]
pub struct QuestionService {
    db: Pool<Sqlite>,
    auth: Authenticator,
}

impl QuestionService {
    pub fn new(db: Pool<Sqlite>, auth: Authenticator) -> Self {
        Self { db, auth }
    }

    pub async fn create(&self, token: &str, content: &str) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "post a question").await?;

        let question = QuestionRepository::create(&mut tx, principal.user.id, content).await?;

        tx.commit().await?;
        tracing::info!(question = %question.uuid, user = %principal.user.uuid, "question created");
        Ok(Outcome::new(question.uuid, QUESTION_CREATED))
    }

    pub async fn edit(
        &self,
        token: &str,
        question_uuid: &str,
        content: &str,
    ) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "edit the question").await?;

        // Load the question, then check ownership
        let question = QuestionRepository::get_by_uuid(&mut tx, question_uuid)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        require_owner(&principal, &question, "edit the question")?;

        let question = QuestionRepository::update_content(&mut tx, question.id, content).await?;

        tx.commit().await?;
        tracing::info!(question = %question.uuid, "question edited");
        Ok(Outcome::new(question.uuid, QUESTION_EDITED))
    }

    pub async fn delete(&self, token: &str, question_uuid: &str) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "delete a question").await?;

        let question = QuestionRepository::get_by_uuid(&mut tx, question_uuid)
            .await?
            .ok_or(AppError::QuestionNotFound)?;
        require_owner_or_admin(&principal, &question, "delete the question")?;

        QuestionRepository::delete(&mut tx, question.id).await?;

        tx.commit().await?;
        tracing::info!(question = %question.uuid, by = %principal.user.uuid, "question deleted");
        Ok(Outcome::new(question.uuid, QUESTION_DELETED))
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Question>, AppError> {
        let mut tx = self.db.begin().await?;
        self.auth.resolve(&mut tx, token, "get all questions").await?;

        let questions = QuestionRepository::get_all(&mut tx).await?;

        tx.commit().await?;
        Ok(questions)
    }

    pub async fn list_by_user(&self, token: &str, user_uuid: &str) -> Result<Vec<Question>, AppError> {
        let mut tx = self.db.begin().await?;
        self.auth
            .resolve(&mut tx, token, "get all questions posted by a specific user")
            .await?;

        let user = UserRepository::get_by_uuid(&mut tx, user_uuid)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let questions = QuestionRepository::get_all_by_user(&mut tx, user.id).await?;

        tx.commit().await?;
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::access::Requirement;
    use crate::test_support::harness;

    #[tokio::test]
    async fn test_create_and_list() {
        let h = harness().await;
        let (alice, token) = h.member("alice").await;

        let outcome = h.questions.create(&token, "What is Rust?").await.unwrap();
        assert_eq!(outcome.status, "QUESTION CREATED");

        let all = h.questions.list(&token).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].uuid, outcome.id);
        assert_eq!(all[0].user_id, alice.id);
    }

    #[tokio::test]
    async fn test_edit_requires_owner() {
        let h = harness().await;
        let (_, alice) = h.member("alice").await;
        let (_, bob) = h.member("bob").await;
        let (_, admin) = h.administrator("carol").await;

        let q = h.questions.create(&alice, "original").await.unwrap();

        let err = h.questions.edit(&bob, &q.id, "hijacked").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { required: Requirement::Owner, .. }));

        // Admins may delete but not edit.
        let err = h.questions.edit(&admin, &q.id, "hijacked").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));

        let outcome = h.questions.edit(&alice, &q.id, "revised").await.unwrap();
        assert_eq!(outcome, Outcome::new(q.id.clone(), "QUESTION EDITED"));

        let all = h.questions.list(&alice).await.unwrap();
        assert_eq!(all[0].content, "revised");
    }

    #[tokio::test]
    async fn test_validation_order() {
        let h = harness().await;
        let (_, alice) = h.member("alice").await;
        let (_, bob) = h.member("bob").await;
        let q = h.questions.create(&alice, "original").await.unwrap();

        // Unknown token beats missing question.
        let err = h.questions.edit("nope", "missing", "x").await.unwrap_err();
        assert!(matches!(err, AppError::NotSignedIn));

        // Signed-out beats missing question.
        h.auth.sign_out(&bob).await.unwrap();
        let err = h.questions.delete(&bob, "missing").await.unwrap_err();
        assert!(matches!(err, AppError::SignedOut("delete a question")));

        // Missing question beats ownership.
        let (_, dave) = h.member("dave").await;
        let err = h.questions.edit(&dave, "missing", "x").await.unwrap_err();
        assert!(matches!(err, AppError::QuestionNotFound));

        let err = h.questions.edit(&dave, &q.id, "x").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_owner_or_admin() {
        let h = harness().await;
        let (_, alice) = h.member("alice").await;
        let (_, bob) = h.member("bob").await;
        let (_, admin) = h.administrator("carol").await;

        let first = h.questions.create(&alice, "first").await.unwrap();
        let second = h.questions.create(&alice, "second").await.unwrap();

        let err = h.questions.delete(&bob, &first.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { required: Requirement::OwnerOrAdmin, .. }));

        assert_eq!(h.questions.delete(&alice, &first.id).await.unwrap().status, "QUESTION DELETED");
        assert_eq!(h.questions.delete(&admin, &second.id).await.unwrap().id, second.id);

        let err = h.questions.delete(&alice, &first.id).await.unwrap_err();
        assert!(matches!(err, AppError::QuestionNotFound));
        assert!(h.questions.list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let h = harness().await;
        let (alice, alice_token) = h.member("alice").await;
        let (bob, bob_token) = h.member("bob").await;

        h.questions.create(&alice_token, "a1").await.unwrap();
        h.questions.create(&bob_token, "b1").await.unwrap();
        h.questions.create(&alice_token, "a2").await.unwrap();

        let by_alice = h.questions.list_by_user(&bob_token, &alice.uuid).await.unwrap();
        assert_eq!(by_alice.len(), 2);
        assert!(by_alice.iter().all(|q| q.user_id == alice.id));

        let by_bob = h.questions.list_by_user(&alice_token, &bob.uuid).await.unwrap();
        assert_eq!(by_bob.len(), 1);

        let err = h.questions.list_by_user(&alice_token, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));

        let err = h.questions.list_by_user("nope", "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotSignedIn));
    }
}
