use super::{DomainError, DomainResult};
use crate::auth::password::{self, PasswordError};
use crate::models::user::{CreateUser, User};
use crate::store::{Store, StoreError};
use tracing::debug;

/// Input for registering a user with a plaintext password
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Creates a user, hashing the password before it reaches the store
///
/// # Errors
///
/// - `Validation("Email and password are required")` when either is missing
///   or blank; no store call is made
/// - `Validation("Email already exists")` when the unique constraint fires
/// - `Store` / `Password` for anything else
pub async fn create_user(store: &dyn Store, input: NewUser) -> DomainResult<User> {
    let (Some(email), Some(password)) = (present(input.email), present(input.password)) else {
        return Err(DomainError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    // Argon2 is CPU-bound; keep it off the async worker threads
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))??;

    let result = store
        .insert_user(CreateUser {
            name: input.name,
            email,
            password_hash,
        })
        .await;

    match result {
        Ok(user) => {
            debug!(user_id = user.id, "User created");
            Ok(user)
        }
        Err(StoreError::UniqueViolation { constraint }) => {
            debug!(%constraint, "Rejected duplicate email");
            Err(DomainError::Validation("Email already exists".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Fetches a user by ID
///
/// # Errors
///
/// `NotFound("User with id {id} not found")` when no row matches.
pub async fn get_user(store: &dyn Store, id: i32) -> DomainResult<User> {
    store
        .find_user(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("User with id {} not found", id)))
}
