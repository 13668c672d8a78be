/// Entity operations on behalf of an authenticated requester
///
/// Every operation takes the store and the requester's user ID, applies the
/// ownership guard, and returns enriched views ready to serialize. Route
/// handlers are thin wrappers over these functions.
///
/// # Modules
///
/// - [`projects`], [`tasks`], [`todos`]: list, get, create, update, delete
///   and (tasks/todos) toggle
/// - [`cascade`]: ordered removal of a parent and its descendants
/// - [`dashboard`]: per-user summary statistics
///
/// # Errors
///
/// All operations return [`ServiceError`]:
///
/// | variant      | cause                                          |
/// |--------------|------------------------------------------------|
/// | `Validation` | field constraint or query parameter rejected   |
/// | `NotFound`   | entity (or its parent on create) is missing    |
/// | `Forbidden`  | entity exists but belongs to another user      |
/// | `Store`      | the store failed                               |

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::auth::ownership::AccessError;
use crate::filter::FilterError;
use crate::models::{Project, Task, Todo};
use crate::stats::{ProjectStats, TaskStats};
use crate::store::StoreError;

pub mod cascade;
pub mod dashboard;
pub mod projects;
pub mod tasks;
pub mod todos;

pub use cascade::RemovalReport;

/// One rejected field and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire (camelCase) name of the field or query parameter
    pub field: String,
    pub message: String,
}

/// Error type for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<AccessError> for ServiceError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(_) => ServiceError::NotFound(err.to_string()),
            AccessError::Forbidden { .. } => ServiceError::Forbidden(err.to_string()),
        }
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::Validation(vec![FieldError {
            field: err.param().to_string(),
            message: err.to_string(),
        }])
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        // BTreeMap keeps the reported order stable
        let mut by_field = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let field = camel_case(&field.to_string());
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                by_field
                    .entry(field.clone())
                    .or_insert_with(Vec::new)
                    .push(message);
            }
        }

        ServiceError::Validation(
            by_field
                .into_iter()
                .flat_map(|(field, messages)| {
                    messages.into_iter().map(move |message| FieldError {
                        field: field.clone(),
                        message,
                    })
                })
                .collect(),
        )
    }
}

/// Runs derive-based field validation
pub(crate) fn validate<T: Validate>(input: &T) -> ServiceResult<()> {
    input.validate().map_err(ServiceError::from)
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for ch in snake.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Project with completion figures over its tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,

    #[serde(flatten)]
    pub stats: ProjectStats,
}

/// Parent project as shown on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Project> for ProjectRef {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
        }
    }
}

/// Task with its parent project summary and todo figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,

    /// `null` if the parent has disappeared
    pub project: Option<ProjectRef>,

    #[serde(flatten)]
    pub stats: TaskStats,
}

/// Parent task as shown on a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub id: Uuid,
    pub name: String,
    pub module_name: String,
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            module_name: task.module_name.clone(),
        }
    }
}

/// Todo with its parent task summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,

    /// `null` if the parent has disappeared
    pub task: Option<TaskRef>,
}
