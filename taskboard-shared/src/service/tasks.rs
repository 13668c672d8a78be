/// Task operations
///
/// Tasks are created under one of the requester's own projects; the owner is
/// the requester and therefore always matches the parent's owner.

use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use super::{cascade, validate, ProjectRef, RemovalReport, ServiceError, ServiceResult, TaskView};
use crate::auth::ownership::{authorize, Action};
use crate::filter::{TaskFilter, TodoFilter};
use crate::models::{CreateTask, Task, UpdateTask};
use crate::stats::{task_stats, TaskStats};
use crate::store::EntityStore;

async fn view(store: &dyn EntityStore, task: Task) -> ServiceResult<TaskView> {
    let todo_filter = TodoFilter::for_task(task.id);
    let (project, todos) = futures::try_join!(
        store.get_project(task.project_id),
        store.find_todos(&todo_filter),
    )?;

    Ok(TaskView {
        project: project.as_ref().map(ProjectRef::from),
        stats: task_stats(&todos),
        task,
    })
}

/// Lists the requester's tasks matching the query parameters
///
/// Ordered by due date ascending, newest first among equal due dates.
pub async fn list(
    store: &dyn EntityStore,
    requester: Uuid,
    params: &HashMap<String, String>,
) -> ServiceResult<Vec<TaskView>> {
    let filter = TaskFilter::from_params(requester, params)?;
    let tasks = store.find_tasks(&filter).await?;
    try_join_all(tasks.into_iter().map(|task| view(store, task))).await
}

pub async fn get(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<TaskView> {
    let task = authorize(store.get_task(id).await?, requester, Action::Access)?;
    view(store, task).await
}

/// Creates a task under a project the requester owns
///
/// # Errors
///
/// `NotFound` if the project does not exist and `Forbidden` if it belongs to
/// someone else; nothing is written in either case.
pub async fn create(store: &dyn EntityStore, requester: Uuid, mut input: CreateTask) -> ServiceResult<TaskView> {
    input.normalize();
    validate(&input)?;

    let project = authorize(
        store.get_project(input.project_id).await?,
        requester,
        Action::Add("tasks"),
    )?;
    let task = store.insert_task(requester, &input).await?;
    info!(task_id = %task.id, project_id = %project.id, "Created task");

    Ok(TaskView {
        task,
        project: Some(ProjectRef::from(&project)),
        stats: TaskStats::default(),
    })
}

pub async fn update(
    store: &dyn EntityStore,
    requester: Uuid,
    id: Uuid,
    mut changes: UpdateTask,
) -> ServiceResult<TaskView> {
    changes.normalize();
    validate(&changes)?;

    let task = authorize(store.get_task(id).await?, requester, Action::Update)?;
    apply(store, task.id, &changes).await
}

/// Flips the completion flag
pub async fn toggle(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<TaskView> {
    let task = authorize(store.get_task(id).await?, requester, Action::Update)?;
    apply(store, task.id, &UpdateTask::completion(!task.completed)).await
}

/// Deletes a task together with its todos
pub async fn delete(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<RemovalReport> {
    cascade::delete_task(store, requester, id).await
}

async fn apply(store: &dyn EntityStore, id: Uuid, changes: &UpdateTask) -> ServiceResult<TaskView> {
    let task = store
        .update_task(id, changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;
    view(store, task).await
}
