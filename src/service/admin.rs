use sqlx::{Pool, Sqlite};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::service::access::require_admin;
use crate::service::auth::Authenticator;
use crate::service::{Outcome, USER_DELETED};

#[derive(Clone)]
pub struct AdminService {
    db: Pool<Sqlite>,
    auth: Authenticator,
}

impl AdminService {
    pub fn new(db: Pool<Sqlite>, auth: Authenticator) -> Self {
        Self { db, auth }
    }

    /// Delete an account together with its sessions, questions and answers.
    /// A store failure during the delete itself is logged and the operation
    /// still reports success.
    pub async fn delete_user(&self, token: &str, user_uuid: &str) -> Result<Outcome, AppError> {
        let mut tx = self.db.begin().await?;
        let principal = self.auth.resolve(&mut tx, token, "delete a user").await?;

        // Target lookup comes before the role check
        let user = UserRepository::get_by_uuid(&mut tx, user_uuid)
            .await?
            .ok_or(AppError::UserNotFound)?;
        require_admin(&principal, "delete a user")?;

        match UserRepository::delete_by_uuid(&mut tx, &user.uuid).await {
            Ok(_) => tracing::info!(user = %user.uuid, by = %principal.user.uuid, "user deleted"),
            Err(e) => tracing::error!(user = %user.uuid, error = %e, "user cleanup failed"),
        }

        tx.commit().await?;
        Ok(Outcome::new(user.uuid, USER_DELETED))
    }
}
