/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Store connectivity check (public)
/// - `projects`: Project CRUD with cascade delete
/// - `tasks`: Task CRUD, filters and completion toggle
/// - `todos`: Todo CRUD, filters and completion toggle
/// - `stats`: Dashboard statistics
///
/// Every `/api` handler receives the verified requester as an
/// `Extension<AuthContext>` inserted by the JWT layer.

use serde::Serialize;
use taskboard_shared::service::RemovalReport;

pub mod health;
pub mod projects;
pub mod stats;
pub mod tasks;
pub mod todos;

/// Envelope for list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Envelope for single-entity endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,

    /// Rows removed per collection, including cascaded children
    pub removed: RemovalReport,
}

impl From<RemovalReport> for DeleteResponse {
    fn from(removed: RemovalReport) -> Self {
        Self {
            deleted: true,
            removed,
        }
    }
}
