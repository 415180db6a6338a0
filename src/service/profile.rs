use sqlx::{Pool, Sqlite};

use crate::db::{User, UserRepository};
use crate::error::AppError;
use crate::service::auth::Authenticator;

/// Read access to user profiles for any signed-in user.
#[derive(Clone)]
pub struct ProfileService {
    db: Pool<Sqlite>,
    auth: Authenticator,
}

impl ProfileService {
    pub fn new(db: Pool<Sqlite>, auth: Authenticator) -> Self {
        Self { db, auth }
    }

    pub async fn get(&self, token: &str, user_uuid: &str) -> Result<User, AppError> {
        let mut conn = self.db.acquire().await?;
        self.auth.resolve(&mut conn, token, "get user details").await?;

        UserRepository::get_by_uuid(&mut conn, user_uuid)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;

    #[tokio::test]
    async fn test_profile_lookup() {
        let h = harness().await;
        let (alice, _) = h.member("alice").await;
        let (_, bob) = h.member("bob").await;

        let profile = h.profiles.get(&bob, &alice.uuid).await.unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.last_name.as_deref(), Some("Example"));

        let err = h.profiles.get(&bob, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));

        h.auth.sign_out(&bob).await.unwrap();
        let err = h.profiles.get(&bob, &alice.uuid).await.unwrap_err();
        assert!(matches!(err, AppError::SignedOut(_)));
    }
}
