/// Dashboard statistics endpoint
///
/// ```text
/// GET /api/stats
/// ```
///
/// Counts by status and priority, overdue items, activity in the last seven
/// days and completion rates over everything the requester owns.

use crate::{
    app::AppState,
    error::{ApiResult, AppJson},
    routes::DataResponse,
};
use axum::{extract::State, Extension};
use taskboard_shared::{auth::middleware::AuthContext, service::dashboard, stats::DashboardStats};

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<AppJson<DataResponse<DashboardStats>>> {
    let stats = dashboard::summary(state.store(), auth.user_id).await?;
    Ok(AppJson(DataResponse::new(stats)))
}
