use std::sync::Arc;
use sqlx::{Pool, Sqlite};
use crate::config::Config;
use crate::crypto::TokenIssuer;
use crate::service::{AdminService, AnswerService, Authenticator, ProfileService, QuestionService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Authenticator,
    pub questions: QuestionService,
    pub answers: AnswerService,
    pub admin: AdminService,
    pub profiles: ProfileService,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>, config: Arc<Config>, issuer: TokenIssuer) -> Self {
        let auth = Authenticator::new(
            db.clone(),
            Arc::new(issuer),
            config.session_expiry_hours,
            config.enforce_session_expiry,
        );

        Self {
            questions: QuestionService::new(db.clone(), auth.clone()),
            answers: AnswerService::new(db.clone(), auth.clone()),
            admin: AdminService::new(db.clone(), auth.clone()),
            profiles: ProfileService::new(db, auth.clone()),
            auth,
            config,
        }
    }
}
