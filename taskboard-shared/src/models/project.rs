/// Project model
///
/// A project is the top of the ownership hierarchy. It has zero or more
/// tasks; deleting a project removes its tasks and their todos.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('active', 'completed', 'on-hold');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     name VARCHAR(100) NOT NULL,
///     description VARCHAR(500),
///     eta TIMESTAMPTZ NOT NULL,
///     status project_status NOT NULL DEFAULT 'active',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{clear_if_empty, date, trim_in_place, trim_option, ProjectStatus};
use crate::auth::ownership::Owned;

/// Project owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Estimated completion date
    pub eta: DateTime<Utc>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// User who owns the project
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

impl Owned for Project {
    const KIND: &'static str = "project";

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Input for creating a project
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(deserialize_with = "date::deserialize")]
    pub eta: DateTime<Utc>,

    #[serde(default)]
    pub status: ProjectStatus,
}

impl CreateProject {
    /// Trims string fields; empty descriptions are dropped
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_option(&mut self.description);
        if self.description.as_deref() == Some("") {
            self.description = None;
        }
    }
}

/// Partial update for a project
///
/// Absent fields are left unchanged. Ownership cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description cannot be more than 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "date::deserialize_option")]
    pub eta: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    /// Trims string fields; a blank description clears the stored one
    pub fn normalize(&mut self) {
        trim_option(&mut self.name);
        trim_option(&mut self.description);
    }

    /// Applies the update to an in-memory project
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = clear_if_empty(description);
        }
        if let Some(eta) = self.eta {
            project.eta = eta;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_project_defaults() {
        let input: CreateProject = serde_json::from_value(json!({
            "name": "Website",
            "eta": "2024-06-01"
        }))
        .unwrap();

        assert_eq!(input.status, ProjectStatus::Active);
        assert!(input.description.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_project_rejects_long_name() {
        let mut input: CreateProject = serde_json::from_value(json!({
            "name": "x".repeat(101),
            "eta": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        input.normalize();

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_project_blank_name_after_trim() {
        let mut input: CreateProject = serde_json::from_value(json!({
            "name": "    ",
            "eta": "2024-06-01"
        }))
        .unwrap();
        input.normalize();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_project_requires_eta() {
        let result = serde_json::from_value::<CreateProject>(json!({ "name": "No date" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_project_apply() {
        let now = Utc::now();
        let mut project = Project {
            id: Uuid::new_v4(),
            name: "Old".to_string(),
            description: None,
            eta: now,
            status: ProjectStatus::Active,
            owner_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let update: UpdateProject = serde_json::from_value(json!({
            "name": "New",
            "status": "on-hold"
        }))
        .unwrap();
        update.apply_to(&mut project);

        assert_eq!(project.name, "New");
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.eta, now);
    }
}
