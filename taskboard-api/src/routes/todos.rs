/// Todo endpoints
///
/// - `GET /api/todos` - List own todos
/// - `POST /api/todos` - Create todo under an owned task
/// - `GET /api/todos/:id` - Get todo
/// - `PUT /api/todos/:id` - Update todo
/// - `DELETE /api/todos/:id` - Delete todo
/// - `PATCH /api/todos/:id/toggle` - Flip completion
///
/// # List Filters
///
/// `task`, `priority`, `completed`, `startDate`/`endDate` on the due date and
/// `createdFrom`/`createdTo` on the creation time.

use crate::{
    app::AppState,
    error::{ApiResult, AppJson, AppPath, AppQuery},
    routes::{DataResponse, DeleteResponse, ListResponse},
};
use axum::{extract::State, http::StatusCode, Extension};
use std::collections::HashMap;
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::{CreateTodo, UpdateTodo},
    service::{todos, TodoView},
};
use uuid::Uuid;

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> ApiResult<AppJson<ListResponse<TodoView>>> {
    let todos = todos::list(state.store(), auth.user_id, &params).await?;
    Ok(AppJson(todos.into()))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DataResponse<TodoView>>> {
    let todo = todos::get(state.store(), auth.user_id, id).await?;
    Ok(AppJson(DataResponse::new(todo)))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(input): AppJson<CreateTodo>,
) -> ApiResult<(StatusCode, AppJson<DataResponse<TodoView>>)> {
    let todo = todos::create(state.store(), auth.user_id, input).await?;
    Ok((StatusCode::CREATED, AppJson(DataResponse::new(todo))))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
    AppJson(changes): AppJson<UpdateTodo>,
) -> ApiResult<AppJson<DataResponse<TodoView>>> {
    let todo = todos::update(state.store(), auth.user_id, id, changes).await?;
    Ok(AppJson(DataResponse::new(todo)))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DataResponse<TodoView>>> {
    let todo = todos::toggle(state.store(), auth.user_id, id).await?;
    Ok(AppJson(DataResponse::new(todo)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DeleteResponse>> {
    let removed = todos::delete(state.store(), auth.user_id, id).await?;
    Ok(AppJson(removed.into()))
}
