/// Query predicates for listing entities
///
/// List endpoints accept a loose set of optional query-string parameters.
/// This module turns them into typed predicates that every store
/// implementation evaluates the same way: `PgStore` translates them to SQL,
/// `MemoryStore` calls the `matches` methods directly.
///
/// # Parameters
///
/// | parameter     | applies to   | meaning                                  |
/// |---------------|--------------|------------------------------------------|
/// | `project`     | tasks        | parent project id                        |
/// | `task`        | todos        | parent task id                           |
/// | `priority`    | tasks, todos | exact priority match                     |
/// | `completed`   | tasks, todos | `"true"` / `"false"`, anything else ignored |
/// | `startDate`   | tasks, todos | `dueDate >= startDate`                   |
/// | `endDate`     | tasks, todos | `dueDate <= endDate`                     |
/// | `createdFrom` | todos        | `createdAt >= createdFrom`               |
/// | `createdTo`   | todos        | `createdAt <= createdTo`                 |
///
/// Empty parameter values are treated as absent. Predicates built from
/// parameters are always restricted to the requester's own rows.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use taskboard_shared::filter::TodoFilter;
/// use uuid::Uuid;
///
/// let owner = Uuid::new_v4();
/// let params = HashMap::from([
///     ("completed".to_string(), "true".to_string()),
///     ("priority".to_string(), "high".to_string()),
/// ]);
///
/// let filter = TodoFilter::from_params(owner, &params).unwrap();
/// assert_eq!(filter.owner_id, Some(owner));
/// assert_eq!(filter.completed, Some(true));
/// assert_eq!(filter.priority.as_deref(), Some("high"));
/// ```

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{date::parse_datetime, Project, Task, Todo};

/// Error type for query parameter parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A date parameter could not be parsed
    #[error("Invalid date for '{param}': {value}")]
    InvalidDate { param: String, value: String },

    /// An id parameter is not a UUID
    #[error("Invalid id for '{param}': {value}")]
    InvalidId { param: String, value: String },
}

impl FilterError {
    /// Name of the offending query parameter
    pub fn param(&self) -> &str {
        match self {
            FilterError::InvalidDate { param, .. } | FilterError::InvalidId { param, .. } => param,
        }
    }
}

/// Inclusive instant range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from) && self.to.map_or(true, |to| instant <= to)
    }

    fn from_params(
        params: &HashMap<String, String>,
        from_key: &str,
        to_key: &str,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            from: date_param(params, from_key)?,
            to: date_param(params, to_key)?,
        })
    }
}

/// Predicate over projects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub owner_id: Option<Uuid>,
}

impl ProjectFilter {
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        self.owner_id.map_or(true, |owner| project.owner_id == owner)
    }
}

/// Predicate over tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due: DateRange,
}

impl TaskFilter {
    /// All tasks of one owner
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    /// All tasks of one project, regardless of owner
    pub fn for_project(project_id: Uuid) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }

    /// Builds an owner-scoped filter from list query parameters
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if `project` is not a UUID or a date bound does
    /// not parse.
    pub fn from_params(owner_id: Uuid, params: &HashMap<String, String>) -> Result<Self, FilterError> {
        Ok(Self {
            owner_id: Some(owner_id),
            project_id: id_param(params, "project")?,
            completed: parse_completed(param(params, "completed")),
            priority: param(params, "priority").map(str::to_string),
            due: DateRange::from_params(params, "startDate", "endDate")?,
        })
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.owner_id.map_or(true, |owner| task.owner_id == owner)
            && self.project_id.map_or(true, |project| task.project_id == project)
            && self.completed.map_or(true, |completed| task.completed == completed)
            && self
                .priority
                .as_deref()
                .map_or(true, |priority| task.priority.as_str() == priority)
            && self.due.contains(task.due_date)
    }
}

/// Predicate over todos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub owner_id: Option<Uuid>,
    pub task_id: Option<Uuid>,

    /// Parent task must be one of these (used by cascade deletes)
    pub task_ids: Option<Vec<Uuid>>,

    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub due: DateRange,
    pub created: DateRange,
}

impl TodoFilter {
    /// All todos of one owner
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Default::default()
        }
    }

    /// All todos of one task, regardless of owner
    pub fn for_task(task_id: Uuid) -> Self {
        Self {
            task_id: Some(task_id),
            ..Default::default()
        }
    }

    /// All todos whose task is in `task_ids`; an empty set matches nothing
    pub fn for_tasks(task_ids: Vec<Uuid>) -> Self {
        Self {
            task_ids: Some(task_ids),
            ..Default::default()
        }
    }

    /// Builds an owner-scoped filter from list query parameters
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if `task` is not a UUID or a date bound does not
    /// parse.
    pub fn from_params(owner_id: Uuid, params: &HashMap<String, String>) -> Result<Self, FilterError> {
        Ok(Self {
            owner_id: Some(owner_id),
            task_id: id_param(params, "task")?,
            task_ids: None,
            completed: parse_completed(param(params, "completed")),
            priority: param(params, "priority").map(str::to_string),
            due: DateRange::from_params(params, "startDate", "endDate")?,
            created: DateRange::from_params(params, "createdFrom", "createdTo")?,
        })
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.owner_id.map_or(true, |owner| todo.owner_id == owner)
            && self.task_id.map_or(true, |task| todo.task_id == task)
            && self
                .task_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&todo.task_id))
            && self.completed.map_or(true, |completed| todo.completed == completed)
            && self
                .priority
                .as_deref()
                .map_or(true, |priority| todo.priority.as_str() == priority)
            && self.due.contains(todo.due_date)
            && self.created.contains(todo.created_at)
    }
}

/// Parses the `completed` flag; only exact "true"/"false" filter
pub fn parse_completed(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn date_param(params: &HashMap<String, String>, key: &str) -> Result<Option<DateTime<Utc>>, FilterError> {
    param(params, key)
        .map(|raw| {
            parse_datetime(raw).ok_or_else(|| FilterError::InvalidDate {
                param: key.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn id_param(params: &HashMap<String, String>, key: &str) -> Result<Option<Uuid>, FilterError> {
    param(params, key)
        .map(|raw| {
            Uuid::parse_str(raw).map_err(|_| FilterError::InvalidId {
                param: key.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}
