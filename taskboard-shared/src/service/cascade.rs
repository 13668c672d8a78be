/// Cascade deletes
///
/// Removing a parent removes its descendants first, leaf to root:
///
/// - project: todos of its tasks, then its tasks, then the project
/// - task: its todos, then the task
///
/// The steps are separate store calls with no rollback. If one fails, the
/// rows already removed stay removed and the error is returned; retrying the
/// delete finishes the job because every step is idempotent.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ServiceResult;
use crate::auth::ownership::{authorize, Action};
use crate::filter::{TaskFilter, TodoFilter};
use crate::store::EntityStore;

/// Number of rows each cascade step removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    pub projects: u64,
    pub tasks: u64,
    pub todos: u64,
}

/// Deletes an owned project with all of its tasks and their todos
///
/// # Errors
///
/// `NotFound` or `Forbidden` from the ownership guard, or `Store` if any step
/// fails.
pub async fn delete_project(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<RemovalReport> {
    let project = authorize(store.get_project(id).await?, requester, Action::Delete)?;

    let task_ids = store
        .find_tasks(&TaskFilter::for_project(project.id))
        .await?
        .into_iter()
        .map(|task| task.id)
        .collect();

    let todos = store.delete_todos(&TodoFilter::for_tasks(task_ids)).await?;
    let tasks = store.delete_tasks(&TaskFilter::for_project(project.id)).await?;
    let projects = u64::from(store.delete_project(project.id).await?);

    let report = RemovalReport { projects, tasks, todos };
    info!(project_id = %project.id, tasks, todos, "Deleted project");
    Ok(report)
}

/// Deletes an owned task with all of its todos
///
/// # Errors
///
/// `NotFound` or `Forbidden` from the ownership guard, or `Store` if any step
/// fails.
pub async fn delete_task(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<RemovalReport> {
    let task = authorize(store.get_task(id).await?, requester, Action::Delete)?;

    let todos = store.delete_todos(&TodoFilter::for_task(task.id)).await?;
    let tasks = u64::from(store.delete_task(task.id).await?);

    info!(task_id = %task.id, todos, "Deleted task");
    Ok(RemovalReport {
        projects: 0,
        tasks,
        todos,
    })
}
