/// Task endpoints
///
/// - `POST /tasks` - Create a task in an existing project

use crate::{
    app::AppState,
    error::{required, ApiError, ApiResult, ReportExt},
    extract::RequestOrigin,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    domain,
    models::task::{CreateTask, TaskStatus},
};
use validator::Validate;

pub const COLLECTION: &str = "tasks";

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,

    pub description: Option<String>,

    /// One of "To Do", "In Progress", "Completed"; defaults to "To Do"
    pub status: Option<String>,

    #[validate(required(message = "project_id is required"))]
    pub project_id: Option<i32>,
}

/// Create task response
///
/// `name` carries the task title and `project` the project ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTaskResponse {
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub project: i32,
    pub url: String,
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "title": "T", "description": null, "status": "To Do", "project_id": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or project_id, unknown status, or
///   project does not exist
/// - `500 Internal Server Error`: Store failure
pub async fn create_task(
    State(state): State<AppState>,
    origin: RequestOrigin,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<CreatedTaskResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let status = match req.status.as_deref() {
        Some(label) => label
            .parse::<TaskStatus>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => TaskStatus::default(),
    };

    let task = domain::create_task(
        &*state.store,
        CreateTask {
            title: required(req.title, "title")?,
            description: req.description,
            status,
            project_id: required(req.project_id, "project_id")?,
        },
    )
    .await
    .report("Could not create task")?;

    Ok(Json(CreatedTaskResponse {
        url: origin.resource_url(COLLECTION, task.id),
        name: task.title,
        description: task.description,
        status: task.status,
        project: task.project_id,
    }))
}
