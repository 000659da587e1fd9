/// Task assignment model and database operations
///
/// Links a task to a user. Pairs are not unique: the same user may be
/// assigned to the same task more than once.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_assignments (
///     id SERIAL PRIMARY KEY,
///     task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Assignment of a user to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignment {
    /// Auto-incrementing assignment ID
    pub id: i32,

    /// Assigned task
    pub task_id: i32,

    /// Assignee
    pub user_id: i32,

    /// When the assignment was recorded
    pub assigned_at: DateTime<Utc>,
}

/// Input for creating an assignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateTaskAssignment {
    pub task_id: i32,
    pub user_id: i32,
}

impl TaskAssignment {
    /// Records a new assignment, stamping `assigned_at` with the database clock
    pub async fn create(
        pool: &PgPool,
        data: CreateTaskAssignment,
    ) -> Result<Self, sqlx::Error> {
        let assignment = sqlx::query_as::<_, TaskAssignment>(
            r#"
            INSERT INTO task_assignments (task_id, user_id)
            VALUES ($1, $2)
            RETURNING id, task_id, user_id, assigned_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    /// Lists all assignments ordered by ID
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let assignments = sqlx::query_as::<_, TaskAssignment>(
            r#"
            SELECT id, task_id, user_id, assigned_at
            FROM task_assignments
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(assignments)
    }
}
