/// User endpoints
///
/// - `POST /users` - Register a user
/// - `GET /users/:id` - Fetch a user
///
/// Neither response ever includes the password or its hash.

use crate::{
    app::AppState,
    error::{ApiResult, ReportExt},
    extract::RequestOrigin,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::domain::{self, NewUser};
use validator::Validate;

/// Collection segment used in user URLs
pub const COLLECTION: &str = "users";

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Optional display name
    pub name: Option<String>,

    /// Email address, unique across users
    #[validate(required(message = "email is required"))]
    pub email: Option<String>,

    /// Plaintext password, hashed before storage
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

/// Create user response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub name: Option<String>,
    pub email: String,
    pub url: String,
}

/// Fetch user response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub url: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "name": "A", "email": "a@x.com", "password": "pw" }
/// ```
///
/// # Response
///
/// ```json
/// { "name": "A", "email": "a@x.com", "url": "http://host/users/1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing email or password, or email already exists
/// - `500 Internal Server Error`: Store failure
pub async fn create_user(
    State(state): State<AppState>,
    origin: RequestOrigin,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Json<CreatedUserResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let user = domain::create_user(
        &*state.store,
        NewUser {
            name: req.name,
            email: req.email,
            password: req.password,
        },
    )
    .await
    .report("Could not create user")?;

    Ok(Json(CreatedUserResponse {
        url: origin.resource_url(COLLECTION, user.id),
        name: user.name,
        email: user.email,
    }))
}

/// Fetch a user by ID
///
/// # Errors
///
/// - `404 Not Found`: No user with this ID
/// - `500 Internal Server Error`: Store failure
pub async fn get_user(
    State(state): State<AppState>,
    origin: RequestOrigin,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = path?;
    let user = domain::get_user(&*state.store, id)
        .await
        .report("Could not fetch user")?;

    Ok(Json(UserResponse {
        id: user.id,
        url: origin.resource_url(COLLECTION, user.id),
        name: user.name,
        email: user.email,
    }))
}
