use super::{DomainError, DomainResult};
use crate::models::project::{CreateProject, Project};
use crate::store::Store;
use tracing::debug;

/// Creates a project after checking that its owner exists
///
/// # Errors
///
/// - `Validation("Project name is required")` when the name is blank
/// - `Validation("Owner with id {id} does not exist")` when the owner is
///   absent; nothing is inserted
pub async fn create_project(store: &dyn Store, data: CreateProject) -> DomainResult<Project> {
    if data.name.trim().is_empty() {
        return Err(DomainError::Validation("Project name is required".to_string()));
    }

    if store.find_user(data.owner_id).await?.is_none() {
        return Err(DomainError::Validation(format!(
            "Owner with id {} does not exist",
            data.owner_id
        )));
    }

    let project = store.insert_project(data).await?;
    debug!(project_id = project.id, owner_id = project.owner_id, "Project created");
    Ok(project)
}
