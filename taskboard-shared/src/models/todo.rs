/// Todo model
///
/// Todos are the leaves of the hierarchy. Each one belongs to a task owned by
/// the same user and carries an estimated effort that rolls up into the
/// task's statistics.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id),
///     title VARCHAR(100) NOT NULL,
///     description VARCHAR(500),
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     due_date TIMESTAMPTZ NOT NULL,
///     priority priority_level NOT NULL DEFAULT 'medium',
///     estimated_time DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (estimated_time >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{clear_if_empty, date, trim_in_place, trim_option, Priority};
use crate::auth::ownership::Owned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,

    /// Estimated effort (hours, by convention)
    pub estimated_time: f64,

    /// Parent task
    pub task_id: Uuid,

    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Todo {
    const KIND: &'static str = "todo";

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Input for creating a todo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(deserialize_with = "date::deserialize")]
    pub due_date: DateTime<Utc>,

    #[serde(default)]
    pub priority: Priority,

    #[validate(range(min = 0.0, message = "Estimated time cannot be negative"))]
    #[serde(default)]
    pub estimated_time: Option<f64>,

    /// Parent task (accepted as `task` or `taskId`)
    #[serde(alias = "task")]
    pub task_id: Uuid,
}

impl CreateTodo {
    /// Trims string fields; empty descriptions are dropped
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_option(&mut self.description);
        if self.description.as_deref() == Some("") {
            self.description = None;
        }
    }
}

/// Partial update for a todo
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[serde(default)]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,

    #[serde(default, deserialize_with = "date::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[validate(range(min = 0.0, message = "Estimated time cannot be negative"))]
    #[serde(default)]
    pub estimated_time: Option<f64>,
}

impl UpdateTodo {
    /// Update that only sets the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Trims string fields; a blank description clears the stored one
    pub fn normalize(&mut self) {
        trim_option(&mut self.title);
        trim_option(&mut self.description);
    }

    /// Applies the update to an in-memory todo
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = clear_if_empty(description);
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(estimated_time) = self.estimated_time {
            todo.estimated_time = estimated_time;
        }
    }
}
