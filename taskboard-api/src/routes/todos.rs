/// Legacy todo list endpoints, mounted at the root
///
/// - `GET /` - List todos
/// - `POST /` - Create a todo
/// - `DELETE /` - Delete every todo
/// - `GET /:id` - Fetch a todo
/// - `PATCH /:id` - Merge properties into a todo
/// - `DELETE /:id` - Delete a todo
///
/// Absent IDs are 404; every other failure is a 500.

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
use taskboard_shared::{
    domain::todos,
    models::todo::{CreateTodo, Todo, UpdateTodo},
};

/// Todo as returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: Option<String>,
    pub order: Option<i32>,
    pub completed: bool,
    pub url: String,
}

impl TodoResponse {
    fn new(origin: &RequestOrigin, todo: Todo) -> Self {
        Self {
            url: origin.root_url(todo.id),
            id: todo.id,
            title: todo.title,
            order: todo.order,
            completed: todo.completed,
        }
    }

    fn many(origin: &RequestOrigin, todos: Vec<Todo>) -> Vec<Self> {
        todos.into_iter().map(|todo| Self::new(origin, todo)).collect()
    }
}

pub async fn list_todos(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = todos::list_todos(&*state.store)
        .await
        .report("Could not fetch all todos")?;

    Ok(Json(TodoResponse::many(&origin, todos)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    origin: RequestOrigin,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(id) = path?;
    let todo = todos::get_todo(&*state.store, id)
        .await
        .report("Could not fetch todo")?;

    Ok(Json(TodoResponse::new(&origin, todo)))
}

pub async fn create_todo(
    State(state): State<AppState>,
    origin: RequestOrigin,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Json(data) = payload?;
    let todo = todos::create_todo(&*state.store, data)
        .await
        .report("Could not create todo")?;

    Ok(Json(TodoResponse::new(&origin, todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    origin: RequestOrigin,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(id) = path?;
    let Json(data) = payload?;
    let todo = todos::update_todo(&*state.store, id, data)
        .await
        .report("Could not update todo")?;

    Ok(Json(TodoResponse::new(&origin, todo)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    origin: RequestOrigin,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(id) = path?;
    let todo = todos::delete_todo(&*state.store, id)
        .await
        .report("Could not delete todo")?;

    Ok(Json(TodoResponse::new(&origin, todo)))
}

pub async fn clear_todos(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = todos::clear_todos(&*state.store)
        .await
        .report("Could not delete all todos")?;

    Ok(Json(TodoResponse::many(&origin, todos)))
}
