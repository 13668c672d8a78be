/// Data models for Taskboard
///
/// This module contains the three owned entity types and their request inputs.
///
/// # Models
///
/// - `project`: Top-level container owned by a user
/// - `task`: Work item that belongs to a project
/// - `todo`: Checklist item that belongs to a task
///
/// Every entity carries an `owner_id` that is set from the authenticated
/// identity at creation and never changes afterwards.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::{Priority, ProjectStatus};
///
/// assert_eq!(Priority::default(), Priority::Medium);
/// assert_eq!(ProjectStatus::OnHold.as_str(), "on-hold");
/// ```

use serde::{Deserialize, Serialize};

pub mod date;
pub mod project;
pub mod task;
pub mod todo;

pub use project::{CreateProject, Project, UpdateProject};
pub use task::{CreateTask, Task, UpdateTask};
pub use todo::{CreateTodo, Todo, UpdateTodo};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Work is ongoing
    #[default]
    Active,

    /// All work is done
    Completed,

    /// Paused
    OnHold,
}

impl ProjectStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

/// Priority shared by tasks and todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "priority_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Converts priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Trims a required string in place
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trims an optional string in place
pub(crate) fn trim_option(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim_in_place(inner);
    }
}

/// An empty description means "no description"
pub(crate) fn clear_if_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
