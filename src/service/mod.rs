pub mod access;
pub mod admin;
pub mod answer;
pub mod auth;
pub mod profile;
pub mod question;

pub use admin::AdminService;
pub use answer::{AnswerDetails, AnswerService};
pub use auth::{Authenticator, Principal};
pub use profile::ProfileService;
pub use question::QuestionService;

use serde::Serialize;

pub const USER_REGISTERED: &str = "USER SUCCESSFULLY REGISTERED";
pub const SIGNED_IN: &str = "SIGNED IN SUCCESSFULLY";
pub const SIGNED_OUT: &str = "SIGNED OUT SUCCESSFULLY";
pub const QUESTION_CREATED: &str = "QUESTION CREATED";
pub const QUESTION_EDITED: &str = "QUESTION EDITED";
pub const QUESTION_DELETED: &str = "QUESTION DELETED";
pub const ANSWER_CREATED: &str = "ANSWER CREATED";
pub const ANSWER_EDITED: &str = "ANSWER EDITED";
pub const ANSWER_DELETED: &str = "ANSWER DELETED";
pub const USER_DELETED: &str = "USER SUCCESSFULLY DELETED";

/// Stable identifier of the affected entity plus a fixed status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub id: String,
    pub status: &'static str,
}

impl Outcome {
    pub fn new(id: impl Into<String>, status: &'static str) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}
