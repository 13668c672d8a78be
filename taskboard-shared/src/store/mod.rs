/// Storage abstraction for projects, tasks and todos
///
/// Services talk to persistence only through [`EntityStore`]. Two backends
/// implement it:
///
/// - [`postgres::PgStore`]: production store over a `PgPool`
/// - [`memory::MemoryStore`]: in-process store used by tests and local runs
///
/// Stores know nothing about ownership. Owner scoping is expressed in the
/// filters handed to them and enforced by the service layer.
///
/// # Ordering
///
/// Every `find_*` returns rows in a fixed order:
///
/// - projects: `created_at` descending
/// - tasks and todos: `due_date` ascending, then `created_at` descending

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::filter::{ProjectFilter, TaskFilter, TodoFilter};
use crate::models::{CreateProject, CreateTask, CreateTodo, Project, Task, Todo};
use crate::models::{UpdateProject, UpdateTask, UpdateTodo};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backing database rejected or failed a query
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence primitives per collection
///
/// `update_*` returns `None` and `delete_*` returns `false` when the row is
/// gone. Bulk deletes return the number of rows removed.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    async fn find_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>>;
    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>>;
    async fn insert_project(&self, owner_id: Uuid, data: &CreateProject) -> StoreResult<Project>;
    async fn update_project(&self, id: Uuid, changes: &UpdateProject) -> StoreResult<Option<Project>>;
    async fn delete_project(&self, id: Uuid) -> StoreResult<bool>;

    async fn find_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>>;
    async fn insert_task(&self, owner_id: Uuid, data: &CreateTask) -> StoreResult<Task>;
    async fn update_task(&self, id: Uuid, changes: &UpdateTask) -> StoreResult<Option<Task>>;
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;
    async fn delete_tasks(&self, filter: &TaskFilter) -> StoreResult<u64>;

    async fn find_todos(&self, filter: &TodoFilter) -> StoreResult<Vec<Todo>>;
    async fn get_todo(&self, id: Uuid) -> StoreResult<Option<Todo>>;
    async fn insert_todo(&self, owner_id: Uuid, data: &CreateTodo) -> StoreResult<Todo>;
    async fn update_todo(&self, id: Uuid, changes: &UpdateTodo) -> StoreResult<Option<Todo>>;
    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool>;
    async fn delete_todos(&self, filter: &TodoFilter) -> StoreResult<u64>;
}

/// Sort key for tasks and todos: due date ascending, newest first on ties
pub(crate) fn by_due_date(
    (a_due, a_created): (DateTime<Utc>, DateTime<Utc>),
    (b_due, b_created): (DateTime<Utc>, DateTime<Utc>),
) -> Ordering {
    a_due.cmp(&b_due).then_with(|| b_created.cmp(&a_created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_by_due_date_ordering() {
        let now = Utc::now();
        let earlier = now - Duration::days(1);

        assert_eq!(by_due_date((earlier, now), (now, now)), Ordering::Less);
        // same due date: newer creation sorts first
        assert_eq!(by_due_date((now, now), (now, earlier)), Ordering::Less);
        assert_eq!(by_due_date((now, now), (now, now)), Ordering::Equal);
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }
}
