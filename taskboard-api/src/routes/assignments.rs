/// Task assignment endpoints
///
/// - `POST /assign/:task_id` - Assign the task to a user

use crate::{
    app::AppState,
    error::{required, ApiResult, ReportExt},
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
use taskboard_shared::domain;
use validator::Validate;

pub const COLLECTION: &str = "assigned_task";

/// Assign task request
#[derive(Debug, Deserialize, Validate)]
pub struct AssignTaskRequest {
    #[validate(required(message = "user_id is required"))]
    pub user_id: Option<i32>,
}

/// Assign task response
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignedTaskResponse {
    pub task_id: i32,
    pub user_id: i32,
    pub url: String,
}

/// Assign a task to a user
///
/// # Errors
///
/// - `400 Bad Request`: Missing user_id, or task or user does not exist
/// - `500 Internal Server Error`: Store failure
pub async fn assign_task(
    State(state): State<AppState>,
    origin: RequestOrigin,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AssignTaskRequest>, JsonRejection>,
) -> ApiResult<Json<AssignedTaskResponse>> {
    let Path(task_id) = path?;
    let Json(req) = payload?;
    req.validate()?;
    let user_id = required(req.user_id, "user_id")?;

    let assignment = domain::assign_task(&*state.store, task_id, user_id)
        .await
        .report("Could not assign task")?;

    Ok(Json(AssignedTaskResponse {
        url: origin.resource_url(COLLECTION, assignment.id),
        task_id: assignment.task_id,
        user_id: assignment.user_id,
    }))
}
