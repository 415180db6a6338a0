use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::crypto::TokenIssuer;
use crate::db::{User, UserDraft, MIGRATOR};
use crate::service::{AdminService, AnswerService, Authenticator, ProfileService, QuestionService};

/// A single-connection in-memory pool. The connection must never be
/// recycled, or the database goes with it.
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub fn draft(username: &str) -> UserDraft {
    UserDraft {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: format!("password-{}", username),
        first_name: Some("Alice".to_string()),
        last_name: Some("Example".to_string()),
        ..UserDraft::default()
    }
}

pub fn authenticator(pool: &Pool<Sqlite>, enforce_expiry: bool) -> Authenticator {
    Authenticator::new(pool.clone(), Arc::new(TokenIssuer::generate()), 8, enforce_expiry)
}

pub struct Harness {
    pub pool: Pool<Sqlite>,
    pub auth: Authenticator,
    pub questions: QuestionService,
    pub answers: AnswerService,
    pub admin: AdminService,
    pub profiles: ProfileService,
}

pub async fn harness() -> Harness {
    let pool = test_pool().await;
    let auth = authenticator(&pool, false);
    Harness {
        questions: QuestionService::new(pool.clone(), auth.clone()),
        answers: AnswerService::new(pool.clone(), auth.clone()),
        admin: AdminService::new(pool.clone(), auth.clone()),
        profiles: ProfileService::new(pool.clone(), auth.clone()),
        auth,
        pool,
    }
}

impl Harness {
    /// Sign up and sign in a standard user, returning the user and a live token.
    pub async fn member(&self, username: &str) -> (User, String) {
        let user = self.auth.sign_up(&draft(username)).await.unwrap();
        let principal = self
            .auth
            .sign_in(username, &format!("password-{}", username))
            .await
            .unwrap();
        (user, principal.session.access_token)
    }

    /// Like `member`, with the account promoted to admin before sign-in.
    pub async fn administrator(&self, username: &str) -> (User, String) {
        let user = self.auth.sign_up(&draft(username)).await.unwrap();
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = ?")
            .bind(user.id)
            .execute(&self.pool)
            .await
            .unwrap();
        let principal = self
            .auth
            .sign_in(username, &format!("password-{}", username))
            .await
            .unwrap();
        (user, principal.session.access_token)
    }
}
