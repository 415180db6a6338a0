pub mod models;
pub mod users;
pub mod sessions;
pub mod questions;
pub mod answers;

pub use models::{Answer, Question, Role, Session, User, UserDraft};
pub use users::UserRepository;
pub use sessions::SessionRepository;
pub use questions::QuestionRepository;
pub use answers::AnswerRepository;

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::error::AppError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the connection pool and bring the schema up to date.
pub async fn connect(config: &Config) -> Result<Pool<Sqlite>, AppError> {
    let db = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    MIGRATOR.run(&db).await?;

    Ok(db)
}
