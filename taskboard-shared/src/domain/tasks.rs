use super::{DomainError, DomainResult};
use crate::models::{
    assignment::{CreateTaskAssignment, TaskAssignment},
    task::{CreateTask, Task},
};
use crate::store::Store;
use tracing::debug;

/// Creates a task after checking that its project exists
///
/// # Errors
///
/// - `Validation("Task title is required")` when the title is blank
/// - `Validation("Project with id {id} does not exist")` when the project is
///   absent; nothing is inserted
pub async fn create_task(store: &dyn Store, data: CreateTask) -> DomainResult<Task> {
    if data.title.trim().is_empty() {
        return Err(DomainError::Validation("Task title is required".to_string()));
    }

    if store.find_project(data.project_id).await?.is_none() {
        return Err(DomainError::Validation(format!(
            "Project with id {} does not exist",
            data.project_id
        )));
    }

    let task = store.insert_task(data).await?;
    debug!(task_id = task.id, project_id = task.project_id, status = %task.status, "Task created");
    Ok(task)
}

/// Assigns a task to a user
///
/// The task and user lookups are independent and run concurrently. When both
/// are missing the task is reported.
///
/// # Errors
///
/// - `Validation("Task with id {id} does not exist")`
/// - `Validation("User with id {id} does not exist")`
pub async fn assign_task(
    store: &dyn Store,
    task_id: i32,
    user_id: i32,
) -> DomainResult<TaskAssignment> {
    let (task, user) = tokio::join!(store.find_task(task_id), store.find_user(user_id));

    if task?.is_none() {
        return Err(DomainError::Validation(format!(
            "Task with id {} does not exist",
            task_id
        )));
    }
    if user?.is_none() {
        return Err(DomainError::Validation(format!(
            "User with id {} does not exist",
            user_id
        )));
    }

    let assignment = store
        .insert_assignment(CreateTaskAssignment { task_id, user_id })
        .await?;
    debug!(assignment_id = assignment.id, task_id, user_id, "Task assigned");
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use crate::models::{project::CreateProject, task::TaskStatus, user::CreateUser};
    use crate::store::memory::MemoryStore;

    async fn seed(store: &MemoryStore) -> (i32, i32) {
        let user = store
            .insert_user(CreateUser {
                name: None,
                email: "o@x.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let project = store
            .insert_project(CreateProject {
                name: "P".to_string(),
                description: None,
                owner_id: user.id,
            })
            .await
            .unwrap();
        (user.id, project.id)
    }

    fn task(project_id: i32) -> CreateTask {
        CreateTask {
            title: "T".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            project_id,
        }
    }

    #[tokio::test]
    async fn test_create_task_with_existing_project() {
        let store = MemoryStore::new();
        let (_, project_id) = seed(&store).await;

        let created = create_task(&store, task(project_id)).await.unwrap();
        assert_eq!(created.project_id, project_id);
        assert_eq!(created.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_create_task_missing_project_inserts_nothing() {
        let store = MemoryStore::new();

        let err = create_task(&store, task(999)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Project with id 999 does not exist");
        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assign_task() {
        let store = MemoryStore::new();
        let (user_id, project_id) = seed(&store).await;
        let created = create_task(&store, task(project_id)).await.unwrap();

        let assignment = assign_task(&store, created.id, user_id).await.unwrap();
        assert_eq!(assignment.task_id, created.id);
        assert_eq!(assignment.user_id, user_id);
    }

    #[tokio::test]
    async fn test_assign_task_allows_repeated_pairs() {
        let store = MemoryStore::new();
        let (user_id, project_id) = seed(&store).await;
        let created = create_task(&store, task(project_id)).await.unwrap();

        let first = assign_task(&store, created.id, user_id).await.unwrap();
        let second = assign_task(&store, created.id, user_id).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.list_assignments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_assign_task_missing_task_or_user() {
        let store = MemoryStore::new();
        let (user_id, project_id) = seed(&store).await;
        let created = create_task(&store, task(project_id)).await.unwrap();

        let err = assign_task(&store, 500, user_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Task with id 500 does not exist");

        let err = assign_task(&store, created.id, 600).await.unwrap_err();
        assert_eq!(err.to_string(), "User with id 600 does not exist");

        // Task is reported first when both are missing
        let err = assign_task(&store, 500, 600).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Task with id 500 does not exist");

        assert!(store.list_assignments().await.unwrap().is_empty());
    }
}
