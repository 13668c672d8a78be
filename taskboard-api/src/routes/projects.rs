/// Project endpoints
///
/// - `GET /api/projects` - List own projects with completion figures
/// - `POST /api/projects` - Create project
/// - `GET /api/projects/:id` - Get project
/// - `PUT /api/projects/:id` - Update project
/// - `DELETE /api/projects/:id` - Delete project, its tasks and their todos

use crate::{
    app::AppState,
    error::{ApiResult, AppJson, AppPath},
    routes::{DataResponse, DeleteResponse, ListResponse},
};
use axum::{extract::State, http::StatusCode, Extension};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::{CreateProject, UpdateProject},
    service::{projects, ProjectView},
};
use uuid::Uuid;

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<AppJson<ListResponse<ProjectView>>> {
    let projects = projects::list(state.store(), auth.user_id).await?;
    Ok(AppJson(projects.into()))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DataResponse<ProjectView>>> {
    let project = projects::get(state.store(), auth.user_id, id).await?;
    Ok(AppJson(DataResponse::new(project)))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(input): AppJson<CreateProject>,
) -> ApiResult<(StatusCode, AppJson<DataResponse<ProjectView>>)> {
    let project = projects::create(state.store(), auth.user_id, input).await?;
    Ok((StatusCode::CREATED, AppJson(DataResponse::new(project))))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
    AppJson(changes): AppJson<UpdateProject>,
) -> ApiResult<AppJson<DataResponse<ProjectView>>> {
    let project = projects::update(state.store(), auth.user_id, id, changes).await?;
    Ok(AppJson(DataResponse::new(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<AppJson<DeleteResponse>> {
    let removed = projects::delete(state.store(), auth.user_id, id).await?;
    Ok(AppJson(removed.into()))
}
