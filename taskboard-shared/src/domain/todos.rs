//! Legacy todo list passthrough. No validation beyond reporting absent IDs.

use super::{DomainError, DomainResult};
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::store::Store;

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound(format!("Todo with id {} not found", id))
}

pub async fn list_todos(store: &dyn Store) -> DomainResult<Vec<Todo>> {
    Ok(store.list_todos().await?)
}

pub async fn get_todo(store: &dyn Store, id: i32) -> DomainResult<Todo> {
    store.find_todo(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create_todo(store: &dyn Store, data: CreateTodo) -> DomainResult<Todo> {
    Ok(store.insert_todo(data).await?)
}

pub async fn update_todo(store: &dyn Store, id: i32, data: UpdateTodo) -> DomainResult<Todo> {
    store.update_todo(id, data).await?.ok_or_else(|| not_found(id))
}

pub async fn delete_todo(store: &dyn Store, id: i32) -> DomainResult<Todo> {
    store.delete_todo(id).await?.ok_or_else(|| not_found(id))
}

pub async fn clear_todos(store: &dyn Store) -> DomainResult<Vec<Todo>> {
    Ok(store.clear_todos().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let store = MemoryStore::new();
        let todo = create_todo(
            &store,
            CreateTodo {
                title: Some("buy milk".to_string()),
                order: Some(2),
            },
        )
        .await
        .unwrap();
        assert!(!todo.completed);

        let updated = update_todo(
            &store,
            todo.id,
            UpdateTodo {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title.as_deref(), Some("buy milk"));

        assert_eq!(get_todo(&store, todo.id).await.unwrap(), updated);
        assert_eq!(delete_todo(&store, todo.id).await.unwrap().id, todo.id);
        assert_eq!(get_todo(&store, todo.id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_missing_todo_is_not_found() {
        let store = MemoryStore::new();

        let err = update_todo(&store, 9, UpdateTodo::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Todo with id 9 not found");
        assert_eq!(delete_todo(&store, 9).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_clear_todos() {
        let store = MemoryStore::new();
        create_todo(&store, CreateTodo::default()).await.unwrap();

        assert_eq!(clear_todos(&store).await.unwrap().len(), 1);
        assert!(list_todos(&store).await.unwrap().is_empty());
    }
}
