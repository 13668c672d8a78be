/// Project operations

use futures::future::try_join_all;
use tracing::info;
use uuid::Uuid;

use super::{cascade, validate, ProjectView, RemovalReport, ServiceError, ServiceResult};
use crate::auth::ownership::{authorize, Action};
use crate::filter::{ProjectFilter, TaskFilter};
use crate::models::{CreateProject, Project, UpdateProject};
use crate::stats::{project_stats, ProjectStats};
use crate::store::EntityStore;

async fn view(store: &dyn EntityStore, project: Project) -> ServiceResult<ProjectView> {
    let tasks = store.find_tasks(&TaskFilter::for_project(project.id)).await?;
    Ok(ProjectView {
        stats: project_stats(&tasks),
        project,
    })
}

/// Lists the requester's projects, newest first
pub async fn list(store: &dyn EntityStore, requester: Uuid) -> ServiceResult<Vec<ProjectView>> {
    let projects = store.find_projects(&ProjectFilter::for_owner(requester)).await?;
    try_join_all(projects.into_iter().map(|project| view(store, project))).await
}

pub async fn get(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<ProjectView> {
    let project = authorize(store.get_project(id).await?, requester, Action::Access)?;
    view(store, project).await
}

/// Creates a project owned by the requester
pub async fn create(store: &dyn EntityStore, requester: Uuid, mut input: CreateProject) -> ServiceResult<ProjectView> {
    input.normalize();
    validate(&input)?;

    let project = store.insert_project(requester, &input).await?;
    info!(project_id = %project.id, owner_id = %requester, "Created project");

    Ok(ProjectView {
        project,
        stats: ProjectStats::default(),
    })
}

pub async fn update(
    store: &dyn EntityStore,
    requester: Uuid,
    id: Uuid,
    mut changes: UpdateProject,
) -> ServiceResult<ProjectView> {
    changes.normalize();
    validate(&changes)?;

    let project = authorize(store.get_project(id).await?, requester, Action::Update)?;
    let project = store
        .update_project(project.id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;

    view(store, project).await
}

/// Deletes a project together with its tasks and todos
pub async fn delete(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<RemovalReport> {
    cascade::delete_project(store, requester, id).await
}
