/// In-memory store for tests and demos
///
/// Keeps every table in a `BTreeMap` behind a single async `RwLock`. The
/// rules the migrations enforce in PostgreSQL are mirrored here:
///
/// - `users_email_unique`: duplicate emails fail with `UniqueViolation`
/// - foreign keys on projects, tasks and assignments fail with
///   `ForeignKeyViolation` when the referenced row is missing
/// - deleting a task or user cascades to its assignments
/// - deleting a user who still owns projects fails with `ForeignKeyViolation`
///
/// IDs start at 1 per table and are never reused, like `SERIAL`.
///
/// `set_unavailable(true)` makes every call fail with
/// `StoreError::Unavailable`, which lets tests exercise the 500 path.

use super::{Store, StoreError, StoreResult};
use crate::models::{
    assignment::{CreateTaskAssignment, TaskAssignment},
    project::{CreateProject, Project},
    task::{CreateTask, Task},
    todo::{CreateTodo, Todo, UpdateTodo},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// One table with a `SERIAL`-style ID counter
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    projects: Table<Project>,
    tasks: Table<Task>,
    assignments: Table<TaskAssignment>,
    todos: Table<Todo>,
}

/// Process-local store with the same constraint semantics as the schema
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing (or regaining) the connection to the store
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

fn fk_violation(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation {
        constraint: constraint.to_string(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }

    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if tables.users.rows.values().any(|u| u.email == data.email) {
            return Err(StoreError::UniqueViolation {
                constraint: "users_email_unique".to_string(),
            });
        }

        let user = User {
            id: tables.users.next_id(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
        };
        tables.users.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> StoreResult<Option<User>> {
        self.check_available()?;
        Ok(self.tables.read().await.users.get(id))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.check_available()?;
        Ok(self.tables.read().await.users.all())
    }

    async fn delete_user(&self, id: i32) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if tables.projects.rows.values().any(|p| p.owner_id == id) {
            return Err(fk_violation("projects_owner_id_fkey"));
        }

        let deleted = tables.users.rows.remove(&id).is_some();
        if deleted {
            tables.assignments.rows.retain(|_, a| a.user_id != id);
        }
        Ok(deleted)
    }

    async fn insert_project(&self, data: CreateProject) -> StoreResult<Project> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.users.rows.contains_key(&data.owner_id) {
            return Err(fk_violation("projects_owner_id_fkey"));
        }

        let project = Project {
            id: tables.projects.next_id(),
            name: data.name,
            description: data.description,
            owner_id: data.owner_id,
        };
        tables.projects.rows.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: i32) -> StoreResult<Option<Project>> {
        self.check_available()?;
        Ok(self.tables.read().await.projects.get(id))
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        self.check_available()?;
        Ok(self.tables.read().await.projects.all())
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.projects.rows.contains_key(&data.project_id) {
            return Err(fk_violation("tasks_project_id_fkey"));
        }

        let task = Task {
            id: tables.tasks.next_id(),
            title: data.title,
            description: data.description,
            status: data.status,
            project_id: data.project_id,
        };
        tables.tasks.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: i32) -> StoreResult<Option<Task>> {
        self.check_available()?;
        Ok(self.tables.read().await.tasks.get(id))
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.check_available()?;
        Ok(self.tables.read().await.tasks.all())
    }

    async fn delete_task(&self, id: i32) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let deleted = tables.tasks.rows.remove(&id).is_some();
        if deleted {
            tables.assignments.rows.retain(|_, a| a.task_id != id);
        }
        Ok(deleted)
    }

    async fn insert_assignment(&self, data: CreateTaskAssignment) -> StoreResult<TaskAssignment> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.tasks.rows.contains_key(&data.task_id) {
            return Err(fk_violation("task_assignments_task_id_fkey"));
        }
        if !tables.users.rows.contains_key(&data.user_id) {
            return Err(fk_violation("task_assignments_user_id_fkey"));
        }

        let assignment = TaskAssignment {
            id: tables.assignments.next_id(),
            task_id: data.task_id,
            user_id: data.user_id,
            assigned_at: Utc::now(),
        };
        tables.assignments.rows.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn list_assignments(&self) -> StoreResult<Vec<TaskAssignment>> {
        self.check_available()?;
        Ok(self.tables.read().await.assignments.all())
    }

    async fn list_todos(&self) -> StoreResult<Vec<Todo>> {
        self.check_available()?;
        Ok(self.tables.read().await.todos.all())
    }

    async fn find_todo(&self, id: i32) -> StoreResult<Option<Todo>> {
        self.check_available()?;
        Ok(self.tables.read().await.todos.get(id))
    }

    async fn insert_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let todo = Todo {
            id: tables.todos.next_id(),
            title: data.title,
            order: data.order,
            completed: false,
        };
        tables.todos.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: i32, data: UpdateTodo) -> StoreResult<Option<Todo>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        Ok(tables.todos.rows.get_mut(&id).map(|todo| {
            data.apply_to(todo);
            todo.clone()
        }))
    }

    async fn delete_todo(&self, id: i32) -> StoreResult<Option<Todo>> {
        self.check_available()?;
        Ok(self.tables.write().await.todos.rows.remove(&id))
    }

    async fn clear_todos(&self) -> StoreResult<Vec<Todo>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let removed = std::mem::take(&mut tables.todos.rows);
        Ok(removed.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskStatus;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: None,
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    async fn seed_task(store: &MemoryStore) -> (User, Task) {
        let user = store.insert_user(new_user("owner@x.com")).await.unwrap();
        let project = store
            .insert_project(CreateProject {
                name: "P".to_string(),
                description: None,
                owner_id: user.id,
            })
            .await
            .unwrap();
        let task = store
            .insert_task(CreateTask {
                title: "T".to_string(),
                description: None,
                status: TaskStatus::ToDo,
                project_id: project.id,
            })
            .await
            .unwrap();
        (user, task)
    }

    #[tokio::test]
    async fn test_ids_increment_per_table() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("a@x.com")).await.unwrap();
        let b = store.insert_user(new_user("b@x.com")).await.unwrap();
        let todo = store.insert_todo(CreateTodo::default()).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(todo.id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@x.com")).await.unwrap();

        let err = store.insert_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_project_requires_existing_owner() {
        let store = MemoryStore::new();
        let err = store
            .insert_project(CreateProject {
                name: "P".to_string(),
                description: None,
                owner_id: 42,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_deleting_task_cascades_to_assignments() {
        let store = MemoryStore::new();
        let (user, task) = seed_task(&store).await;
        store
            .insert_assignment(CreateTaskAssignment {
                task_id: task.id,
                user_id: user.id,
            })
            .await
            .unwrap();

        assert!(store.delete_task(task.id).await.unwrap());
        assert!(store.list_assignments().await.unwrap().is_empty());
        assert!(!store.delete_task(task.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_assignments() {
        let store = MemoryStore::new();
        let (_owner, task) = seed_task(&store).await;
        let assignee = store.insert_user(new_user("dev@x.com")).await.unwrap();
        store
            .insert_assignment(CreateTaskAssignment {
                task_id: task.id,
                user_id: assignee.id,
            })
            .await
            .unwrap();

        assert!(store.delete_user(assignee.id).await.unwrap());
        assert!(store.list_assignments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_project_owner_is_rejected() {
        let store = MemoryStore::new();
        let (owner, _task) = seed_task(&store).await;

        let err = store.delete_user(owner.id).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
        assert!(store.find_user(owner.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_todos_returns_removed_rows() {
        let store = MemoryStore::new();
        store.insert_todo(CreateTodo::default()).await.unwrap();
        store.insert_todo(CreateTodo::default()).await.unwrap();

        let removed = store.clear_todos().await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(store.list_todos().await.unwrap().is_empty());

        let next = store.insert_todo(CreateTodo::default()).await.unwrap();
        assert_eq!(next.id, 3, "IDs are never reused");
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.list_todos().await, Err(StoreError::Unavailable(_))));

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
