/// Project endpoints
///
/// - `POST /projects` - Create a project owned by an existing user

use crate::{
    app::AppState,
    error::{required, ApiResult, ReportExt},
    extract::RequestOrigin,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{domain, models::project::CreateProject};
use validator::Validate;

pub const COLLECTION: &str = "projects";

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,

    pub description: Option<String>,

    /// ID of the owning user
    #[validate(required(message = "owner_id is required"))]
    pub owner_id: Option<i32>,
}

/// Create project response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedProjectResponse {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub url: String,
}

/// Create a project
///
/// # Errors
///
/// - `400 Bad Request`: Missing name or owner_id, or owner does not exist
/// - `500 Internal Server Error`: Store failure
pub async fn create_project(
    State(state): State<AppState>,
    origin: RequestOrigin,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<Json<CreatedProjectResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let project = domain::create_project(
        &*state.store,
        CreateProject {
            name: required(req.name, "name")?,
            description: req.description,
            owner_id: required(req.owner_id, "owner_id")?,
        },
    )
    .await
    .report("Could not create project")?;

    Ok(Json(CreatedProjectResponse {
        url: origin.resource_url(COLLECTION, project.id),
        name: project.name,
        description: project.description,
        owner_id: project.owner_id,
    }))
}
