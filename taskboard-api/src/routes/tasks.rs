/// Task endpoints
///
/// - `GET /api/tasks` - List own tasks
/// - `POST /api/tasks` - Create task under an owned project
/// - `GET /api/tasks/:id` - Get task
/// - `PUT /api/tasks/:id` - Update task
/// - `DELETE /api/tasks/:id` - Delete task and its todos
/// - `PATCH /api/tasks/:id/toggle` - Flip completion
///
/// # List Filters
///
/// `project`, `priority`, `completed` (`true`/`false`), `startDate` and
/// `endDate` (inclusive bounds on the due date). Results are ordered by due
/// date, then newest first.

use crate::{
    app::AppState,
    error::{ApiResult, AppJson, AppPath, AppQuery},
    routes::{DataResponse, DeleteResponse, ListResponse},
};
use axum::{extract::State, http::StatusCode, Extension};
use std::collections::HashMap;
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::{CreateTask, UpdateTask},
    service::{tasks, TaskView},
};
use uuid::Uuid;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> ApiResult<AppJson<ListResponse<TaskView>>> {
    let tasks = tasks::list(state.store(), auth.user_id, &params).await?;
    Ok(AppJson(tasks.into()))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DataResponse<TaskView>>> {
    let task = tasks::get(state.store(), auth.user_id, id).await?;
    Ok(AppJson(DataResponse::new(task)))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(input): AppJson<CreateTask>,
) -> ApiResult<(StatusCode, AppJson<DataResponse<TaskView>>)> {
    let task = tasks::create(state.store(), auth.user_id, input).await?;
    Ok((StatusCode::CREATED, AppJson(DataResponse::new(task))))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
    AppJson(changes): AppJson<UpdateTask>,
) -> ApiResult<AppJson<DataResponse<TaskView>>> {
    let task = tasks::update(state.store(), auth.user_id, id, changes).await?;
    Ok(AppJson(DataResponse::new(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DataResponse<TaskView>>> {
    let task = tasks::toggle(state.store(), auth.user_id, id).await?;
    Ok(AppJson(DataResponse::new(task)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DeleteResponse>> {
    let removed = tasks::delete(state.store(), auth.user_id, id).await?;
    Ok(AppJson(removed.into()))
}
