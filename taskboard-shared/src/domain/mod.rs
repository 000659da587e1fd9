/// Domain validation and integrity layer
///
/// Wraps the `Store` with the rules the schema alone does not express to
/// callers in a friendly way: required fields, existence of referenced rows,
/// email uniqueness and password hashing. Failures are raised as a closed
/// `DomainError` whose `kind()` decides how the HTTP layer reports it.
///
/// # Check-then-write
///
/// Existence checks run as separate statements before the insert, without a
/// transaction. Two concurrent requests can both pass their checks before
/// either writes. For assignments that is acceptable since pairs are not
/// unique. For users the `users_email_unique` constraint is the real
/// serialization point and its violation is still reported as a
/// validation failure.
///
/// # Modules
///
/// - `users`: create_user, get_user
/// - `projects`: create_project
/// - `tasks`: create_task, assign_task
/// - `todos`: legacy todo list passthrough

pub mod projects;
pub mod tasks;
pub mod todos;
pub mod users;

use crate::auth::password::PasswordError;
use crate::store::StoreError;

pub use projects::create_project;
pub use tasks::{assign_task, create_task};
pub use users::{create_user, get_user, NewUser};

/// Domain result type alias
pub type DomainResult<T> = Result<T, DomainError>;

/// Classification of a domain failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing input, absent referenced row, or uniqueness conflict
    Validation,

    /// Lookup by ID found nothing
    NotFound,

    /// Store connectivity or any unexpected failure
    Infrastructure,
}

/// Error raised by domain operations
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Input rejected before or instead of persisting
    #[error("{0}")]
    Validation(String),

    /// Requested row does not exist
    #[error("{0}")]
    NotFound(String),

    /// Persistence failure passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl DomainError {
    /// Returns how this error should be classified
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::Store(_) | DomainError::Password(_) => ErrorKind::Infrastructure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DomainError::Validation("Email already exists".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(DomainError::NotFound("gone".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            DomainError::from(StoreError::Unavailable("down".into())).kind(),
            ErrorKind::Infrastructure
        );
        assert_eq!(
            DomainError::from(PasswordError::HashError("bad".into())).kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn test_messages_are_passed_through() {
        let err = DomainError::NotFound("User with id 7 not found".into());
        assert_eq!(err.to_string(), "User with id 7 not found");
    }
}
