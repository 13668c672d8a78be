/// Task model
///
/// Tasks belong to a project and own zero or more todos. A task's owner is
/// always the owner of its parent project; this is checked when the task is
/// created.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE priority_level AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     project_id UUID NOT NULL REFERENCES projects(id),
///     name VARCHAR(100) NOT NULL,
///     description VARCHAR(1000),
///     module_name VARCHAR(50) NOT NULL,
///     due_date TIMESTAMPTZ NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     priority priority_level NOT NULL DEFAULT 'medium',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::CreateTask;
/// use validator::Validate;
///
/// let input: CreateTask = serde_json::from_value(serde_json::json!({
///     "name": "Wire up login form",
///     "moduleName": "auth",
///     "dueDate": "2024-02-01",
///     "project": "6f1c2d1e-58a3-4a5b-9a55-5b0d2a0c9e11"
/// })).unwrap();
///
/// assert!(input.validate().is_ok());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{clear_if_empty, date, trim_in_place, trim_option, Priority};
use crate::auth::ownership::Owned;

/// Task model representing a unit of work inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Human-readable task name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Module or area of the project this task touches
    pub module_name: String,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// Completion flag
    pub completed: bool,

    /// Task priority
    pub priority: Priority,

    /// Parent project
    pub project_id: Uuid,

    /// User who owns the task
    pub owner_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Owned for Task {
    const KIND: &'static str = "task";

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Input for creating a new task
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[validate(length(min = 1, max = 100, message = "Task name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description cannot be more than 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Module name must be 1-50 characters"))]
    pub module_name: String,

    #[serde(deserialize_with = "date::deserialize")]
    pub due_date: DateTime<Utc>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    /// Parent project (accepted as `project` or `projectId`)
    #[serde(alias = "project")]
    pub project_id: Uuid,
}

impl CreateTask {
    /// Trims string fields; empty descriptions are dropped
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.module_name);
        trim_option(&mut self.description);
        if self.description.as_deref() == Some("") {
            self.description = None;
        }
    }
}

/// Partial update for a task
///
/// The parent project and owner are fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 100, message = "Task name must be 1-100 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description cannot be more than 1000 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Module name must be 1-50 characters"))]
    #[serde(default)]
    pub module_name: Option<String>,

    #[serde(default, deserialize_with = "date::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completed: Option<bool>,

    #[serde(default)]
    pub priority: Option<Priority>,
}

impl UpdateTask {
    /// Update that only sets the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Trims string fields; a blank description clears the stored one
    pub fn normalize(&mut self) {
        trim_option(&mut self.name);
        trim_option(&mut self.description);
        trim_option(&mut self.module_name);
    }

    /// Applies the update to an in-memory task
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = clear_if_empty(description);
        }
        if let Some(module_name) = &self.module_name {
            task.module_name = module_name.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_input() -> serde_json::Value {
        json!({
            "name": "Design schema",
            "moduleName": "storage",
            "dueDate": "2024-02-01T09:00:00Z",
            "projectId": Uuid::new_v4(),
        })
    }

    #[test]
    fn test_create_task_defaults() {
        let input: CreateTask = serde_json::from_value(create_input()).unwrap();

        assert!(!input.completed);
        assert_eq!(input.priority, Priority::Medium);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_task_accepts_project_alias() {
        let project_id = Uuid::new_v4();
        let input: CreateTask = serde_json::from_value(json!({
            "name": "Alias",
            "moduleName": "core",
            "dueDate": "2024-02-01",
            "project": project_id,
        }))
        .unwrap();

        assert_eq!(input.project_id, project_id);
    }

    #[test]
    fn test_create_task_module_name_limit() {
        let mut value = create_input();
        value["moduleName"] = json!("m".repeat(51));
        let input: CreateTask = serde_json::from_value(value).unwrap();

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("module_name"));
    }

    #[test]
    fn test_create_task_rejects_unknown_priority() {
        let mut value = create_input();
        value["priority"] = json!("urgent");
        assert!(serde_json::from_value::<CreateTask>(value).is_err());
    }

    #[test]
    fn test_update_task_completion() {
        let update = UpdateTask::completion(true);
        assert_eq!(update.completed, Some(true));
        assert!(update.name.is_none());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_task_rejects_empty_name() {
        let mut update = UpdateTask {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        update.normalize();
        assert!(update.validate().is_err());
    }
}
