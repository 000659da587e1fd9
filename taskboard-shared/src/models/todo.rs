/// Todo model and database operations
///
/// The legacy todo list resource. It has no relationship to users, projects
/// or tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id SERIAL PRIMARY KEY,
///     title VARCHAR(255),
///     "order" INTEGER,
///     completed BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: Option<String>,
    pub order: Option<i32>,
    pub completed: bool,
}

/// Input for creating a todo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub order: Option<i32>,
}

/// Partial update for a todo
///
/// All fields are optional. Only non-None fields are written, everything
/// else keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub order: Option<i32>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Applies the present fields onto an existing todo
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = Some(title);
        }
        if let Some(order) = self.order {
            todo.order = Some(order);
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

impl Todo {
    /// Lists all todos ordered by ID
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(r#"SELECT id, title, "order", completed FROM todos ORDER BY id"#)
            .fetch_all(pool)
            .await
    }

    /// Finds a todo by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"SELECT id, title, "order", completed FROM todos WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Creates a todo; `completed` starts out false
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, "order")
            VALUES ($1, $2)
            RETURNING id, title, "order", completed
            "#,
        )
        .bind(data.title)
        .bind(data.order)
        .fetch_one(pool)
        .await
    }

    /// Merges the present fields of `data` into the stored todo
    ///
    /// # Returns
    ///
    /// The updated todo, None if no todo has this ID
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = COALESCE($2, title),
                "order" = COALESCE($3, "order"),
                completed = COALESCE($4, completed)
            WHERE id = $1
            RETURNING id, title, "order", completed
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.order)
        .bind(data.completed)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a todo by ID, returning the removed row
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"DELETE FROM todos WHERE id = $1 RETURNING id, title, "order", completed"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Deletes every todo, returning the removed rows
    pub async fn clear(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(r#"DELETE FROM todos RETURNING id, title, "order", completed"#)
            .fetch_all(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_todo_merges_only_present_fields() {
        let mut todo = Todo {
            id: 3,
            title: Some("walk the dog".to_string()),
            order: Some(1),
            completed: false,
        };

        UpdateTodo {
            completed: Some(true),
            ..Default::default()
        }
        .apply_to(&mut todo);

        assert_eq!(todo.title.as_deref(), Some("walk the dog"));
        assert_eq!(todo.order, Some(1));
        assert!(todo.completed);
    }

    #[test]
    fn test_update_todo_ignores_unknown_json_properties() {
        let update: UpdateTodo =
            serde_json::from_str(r#"{"title": "renamed", "colour": "red"}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("renamed"));
        assert!(update.order.is_none());
        assert!(update.completed.is_none());
    }
}
