/// PostgreSQL-backed store
///
/// Thin adapter from the `Store` trait onto the model queries. Each call is
/// one statement on a pooled connection; no transactions are opened.

use super::{Store, StoreResult};
use crate::models::{
    assignment::{CreateTaskAssignment, TaskAssignment},
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn delete_user(&self, id: i32) -> StoreResult<bool> {
        Ok(User::delete(&self.pool, id).await?)
    }

    async fn insert_project(&self, data: CreateProject) -> StoreResult<Project> {
        Ok(Project::create(&self.pool, data).await?)
    }

    async fn find_project(&self, id: i32) -> StoreResult<Option<Project>> {
        Ok(Project::find_by_id(&self.pool, id).await?)
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(Project::list(&self.pool).await?)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn find_task(&self, id: i32) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }

    async fn delete_task(&self, id: i32) -> StoreResult<bool> {
        Ok(Task::delete(&self.pool, id).await?)
    }

    async fn insert_assignment(&self, data: CreateTaskAssignment) -> StoreResult<TaskAssignment> {
        Ok(TaskAssignment::create(&self.pool, data).await?)
    }

    async fn list_assignments(&self) -> StoreResult<Vec<TaskAssignment>> {
        Ok(TaskAssignment::list(&self.pool).await?)
    }

    async fn list_todos(&self) -> StoreResult<Vec<Todo>> {
        Ok(Todo::list(&self.pool).await?)
    }

    async fn find_todo(&self, id: i32) -> StoreResult<Option<Todo>> {
        Ok(Todo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        Ok(Todo::create(&self.pool, data).await?)
    }

    async fn update_todo(&self, id: i32, data: UpdateTodo) -> StoreResult<Option<Todo>> {
        Ok(Todo::update(&self.pool, id, data).await?)
    }

    async fn delete_todo(&self, id: i32) -> StoreResult<Option<Todo>> {
        Ok(Todo::delete(&self.pool, id).await?)
    }

    async fn clear_todos(&self) -> StoreResult<Vec<Todo>> {
        Ok(Todo::clear(&self.pool).await?)
    }
}
