use std::fmt;

use crate::db::{Answer, Question, Role};
use crate::error::AppError;
use crate::service::auth::Principal;

/// The relationship a principal needs to a resource for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Owner,
    OwnerOrAdmin,
    Admin,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Requirement::Owner => "owner",
            Requirement::OwnerOrAdmin => "owner or admin",
            Requirement::Admin => "admin",
        })
    }
}

/// Content with an immutable owning user.
pub trait Owned {
    /// Resource name used in refusal messages.
    const KIND: &'static str;

    fn owner_id(&self) -> i64;
}

impl Owned for Question {
    const KIND: &'static str = "question";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for Answer {
    const KIND: &'static str = "answer";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

pub fn is_owner(principal: &Principal, resource: &impl Owned) -> bool {
    principal.user.id == resource.owner_id()
}

pub fn is_admin(principal: &Principal) -> bool {
    principal.user.role == Role::Admin
}

pub fn require_owner<R: Owned>(
    principal: &Principal,
    resource: &R,
    action: &'static str,
) -> Result<(), AppError> {
    if is_owner(principal, resource) {
        return Ok(());
    }
    deny(principal, Requirement::Owner, R::KIND, action)
}

pub fn require_owner_or_admin<R: Owned>(
    principal: &Principal,
    resource: &R,
    action: &'static str,
) -> Result<(), AppError> {
    if is_owner(principal, resource) || is_admin(principal) {
        return Ok(());
    }
    deny(principal, Requirement::OwnerOrAdmin, R::KIND, action)
}

pub fn require_admin(principal: &Principal, action: &'static str) -> Result<(), AppError> {
    if is_admin(principal) {
        return Ok(());
    }
    deny(principal, Requirement::Admin, "user", action)
}

fn deny(
    principal: &Principal,
    required: Requirement,
    resource: &'static str,
    action: &'static str,
) -> Result<(), AppError> {
    tracing::warn!(user = %principal.user.uuid, %required, resource, action, "access denied");
    Err(AppError::Forbidden {
        required,
        resource,
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Session, User};

    fn principal(id: i64, role: Role) -> Principal {
        Principal {
            user: User {
                id,
                uuid: format!("user-{}", id),
                username: format!("user{}", id),
                email: format!("user{}@example.com", id),
                password_hash: Vec::new(),
                password_salt: Vec::new(),
                role,
                first_name: None,
                last_name: None,
                country: None,
                about_me: None,
                dob: None,
                contact_number: None,
                created_at: 0,
            },
            session: Session {
                id: 1,
                uuid: "session".to_string(),
                user_id: id,
                access_token: "token".to_string(),
                login_at: 0,
                expires_at: 8 * 3600,
                logout_at: None,
            },
        }
    }

    fn question(owner: i64) -> Question {
        Question {
            id: 10,
            uuid: "question".to_string(),
            content: "Why?".to_string(),
            user_id: owner,
            created_at: 0,
        }
    }

    fn answer(owner: i64) -> Answer {
        Answer {
            id: 20,
            uuid: "answer".to_string(),
            answer: "Because.".to_string(),
            user_id: owner,
            question_id: 10,
            created_at: 0,
        }
    }

    #[test]
    fn test_owner_passes_every_requirement_but_admin() {
        let owner = principal(1, Role::Standard);
        assert!(require_owner(&owner, &question(1), "edit the question").is_ok());
        assert!(require_owner_or_admin(&owner, &answer(1), "delete the answer").is_ok());
        assert!(require_admin(&owner, "delete a user").is_err());
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let stranger = principal(2, Role::Standard);

        let err = require_owner(&stranger, &question(1), "edit the question").unwrap_err();
        assert!(matches!(
            err,
            AppError::Forbidden { required: Requirement::Owner, resource: "question", .. }
        ));
        assert_eq!(err.to_string(), "Only the question owner can edit the question");

        let err = require_owner_or_admin(&stranger, &answer(1), "delete the answer").unwrap_err();
        assert!(matches!(
            err,
            AppError::Forbidden { required: Requirement::OwnerOrAdmin, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Only the answer owner or admin can delete the answer"
        );
    }

    #[test]
    fn test_admin_may_delete_but_not_edit() {
        let admin = principal(3, Role::Admin);
        assert!(is_admin(&admin));
        assert!(!is_owner(&admin, &question(1)));
        assert!(require_owner_or_admin(&admin, &question(1), "delete the question").is_ok());
        assert!(require_owner(&admin, &question(1), "edit the question").is_err());
        assert!(require_admin(&admin, "delete a user").is_ok());
    }
}
