/// Todo operations

use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use super::{validate, RemovalReport, ServiceError, ServiceResult, TaskRef, TodoView};
use crate::auth::ownership::{authorize, Action};
use crate::filter::TodoFilter;
use crate::models::{CreateTodo, Todo, UpdateTodo};
use crate::store::EntityStore;

async fn view(store: &dyn EntityStore, todo: Todo) -> ServiceResult<TodoView> {
    let task = store.get_task(todo.task_id).await?;
    Ok(TodoView {
        task: task.as_ref().map(TaskRef::from),
        todo,
    })
}

/// Lists the requester's todos matching the query parameters
pub async fn list(
    store: &dyn EntityStore,
    requester: Uuid,
    params: &HashMap<String, String>,
) -> ServiceResult<Vec<TodoView>> {
    let filter = TodoFilter::from_params(requester, params)?;
    let todos = store.find_todos(&filter).await?;
    try_join_all(todos.into_iter().map(|todo| view(store, todo))).await
}

pub async fn get(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<TodoView> {
    let todo = authorize(store.get_todo(id).await?, requester, Action::Access)?;
    view(store, todo).await
}

/// Creates a todo under a task the requester owns
///
/// # Errors
///
/// `NotFound` if the task does not exist and `Forbidden` if it belongs to
/// someone else; nothing is written in either case.
pub async fn create(store: &dyn EntityStore, requester: Uuid, mut input: CreateTodo) -> ServiceResult<TodoView> {
    input.normalize();
    validate(&input)?;

    let task = authorize(store.get_task(input.task_id).await?, requester, Action::Add("todos"))?;
    let todo = store.insert_todo(requester, &input).await?;
    info!(todo_id = %todo.id, task_id = %task.id, "Created todo");

    Ok(TodoView {
        todo,
        task: Some(TaskRef::from(&task)),
    })
}

pub async fn update(
    store: &dyn EntityStore,
    requester: Uuid,
    id: Uuid,
    mut changes: UpdateTodo,
) -> ServiceResult<TodoView> {
    changes.normalize();
    validate(&changes)?;

    let todo = authorize(store.get_todo(id).await?, requester, Action::Update)?;
    apply(store, todo.id, &changes).await
}

/// Flips the completion flag
pub async fn toggle(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<TodoView> {
    let todo = authorize(store.get_todo(id).await?, requester, Action::Update)?;
    apply(store, todo.id, &UpdateTodo::completion(!todo.completed)).await
}

/// Deletes a single todo
pub async fn delete(store: &dyn EntityStore, requester: Uuid, id: Uuid) -> ServiceResult<RemovalReport> {
    let todo = authorize(store.get_todo(id).await?, requester, Action::Delete)?;
    let todos = u64::from(store.delete_todo(todo.id).await?);

    info!(todo_id = %todo.id, "Deleted todo");
    Ok(RemovalReport {
        todos,
        ..Default::default()
    })
}

async fn apply(store: &dyn EntityStore, id: Uuid, changes: &UpdateTodo) -> ServiceResult<TodoView> {
    let todo = store
        .update_todo(id, changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Todo not found".to_string()))?;
    view(store, todo).await
}
