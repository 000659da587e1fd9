/// Persistence gateway
///
/// The `Store` trait is the seam between the domain layer and the relational
/// store. Every method issues exactly one statement and performs no
/// validation; callers are trusted. Inserts and updates return the row as
/// persisted, including its generated ID.
///
/// # Implementations
///
/// - `postgres::PgStore`: PostgreSQL via sqlx, delegating to `models`
/// - `memory::MemoryStore`: in-process tables with the same uniqueness,
///   foreign key and cascade rules as the migrations
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::store::{memory::MemoryStore, Store};
/// use taskboard_shared::models::user::CreateUser;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let user = store
///     .insert_user(CreateUser {
///         name: None,
///         email: "a@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
/// assert_eq!(user.id, 1);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::{
    assignment::{CreateTaskAssignment, TaskAssignment},
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{CreateUser, User},
};
use async_trait::async_trait;

/// PostgreSQL SQLSTATE for unique_violation
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign_key_violation
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key constraint rejected the write
    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StoreError::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StoreError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(io_err) => StoreError::Unavailable(io_err.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// Single-statement operations over every persisted entity
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    async fn insert_user(&self, data: CreateUser) -> StoreResult<User>;
    async fn find_user(&self, id: i32) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Removes a user and, by cascade, their assignments
    async fn delete_user(&self, id: i32) -> StoreResult<bool>;

    async fn insert_project(&self, data: CreateProject) -> StoreResult<Project>;
    async fn find_project(&self, id: i32) -> StoreResult<Option<Project>>;
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task>;
    async fn find_task(&self, id: i32) -> StoreResult<Option<Task>>;
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;
    /// Removes a task and, by cascade, its assignments
    async fn delete_task(&self, id: i32) -> StoreResult<bool>;

    async fn insert_assignment(&self, data: CreateTaskAssignment) -> StoreResult<TaskAssignment>;
    async fn list_assignments(&self) -> StoreResult<Vec<TaskAssignment>>;

    async fn list_todos(&self) -> StoreResult<Vec<Todo>>;
    async fn find_todo(&self, id: i32) -> StoreResult<Option<Todo>>;
    async fn insert_todo(&self, data: CreateTodo) -> StoreResult<Todo>;
    async fn update_todo(&self, id: i32, data: UpdateTodo) -> StoreResult<Option<Todo>>;
    async fn delete_todo(&self, id: i32) -> StoreResult<Option<Todo>>;
    async fn clear_todos(&self) -> StoreResult<Vec<Todo>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::UniqueViolation {
            constraint: "users_email_unique".to_string(),
        };
        assert_eq!(err.to_string(), "Unique constraint violated: users_email_unique");
    }
}
