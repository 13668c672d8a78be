/// Derived statistics
///
/// Nothing here is persisted. Completion figures on project and task views
/// and the dashboard summary are recomputed from the current rows on every
/// read, so they can never drift from the underlying data.
///
/// # Example
///
/// ```
/// use taskboard_shared::stats::completion_percentage;
///
/// assert_eq!(completion_percentage(0, 0), 0);
/// assert_eq!(completion_percentage(1, 3), 33);
/// assert_eq!(completion_percentage(2, 3), 67);
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Priority, Project, ProjectStatus, Task, Todo};

/// Window in which an entity counts as recent activity
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Rounds `completed / total` to a whole percentage; 0 when `total` is 0
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Completion summary of a project's tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_percentage: u32,
}

/// Completion and effort summary of a task's todos
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_todos: usize,
    pub completed_todos: usize,

    /// Sum of the todos' estimated hours
    pub total_estimated_time: f64,
}

pub fn project_stats(tasks: &[Task]) -> ProjectStats {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    ProjectStats {
        total_tasks,
        completed_tasks,
        completion_percentage: completion_percentage(completed_tasks, total_tasks),
    }
}

pub fn task_stats(todos: &[Todo]) -> TaskStats {
    let total_todos = todos.len();
    let completed_todos = todos.iter().filter(|t| t.completed).count();
    TaskStats {
        total_todos,
        completed_todos,
        total_estimated_time: todos.iter().map(|t| t.estimated_time).sum(),
    }
}

/// Per-user summary over all owned projects, tasks and todos
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub projects: ProjectSummary,
    pub tasks: WorkSummary,
    pub todos: WorkSummary,
    pub recent_activity: RecentActivity,
    pub completion_rate: CompletionRate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub status_distribution: StatusDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub active: usize,
    pub completed: usize,
    pub on_hold: usize,
}

/// Counts shared by tasks and todos
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub priority_distribution: PriorityDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub projects: usize,
    pub tasks: usize,
    pub todos: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRate {
    pub tasks: u32,
    pub todos: u32,
}

/// One row's contribution to a [`WorkSummary`]
struct WorkItem {
    completed: bool,
    due_date: DateTime<Utc>,
    priority: Priority,
}

impl WorkSummary {
    fn collect(items: impl Iterator<Item = WorkItem>, now: DateTime<Utc>) -> Self {
        let mut summary = Self::default();
        for item in items {
            summary.total += 1;
            if item.completed {
                summary.completed += 1;
            } else if item.due_date < now {
                summary.overdue += 1;
            }
            match item.priority {
                Priority::High => summary.priority_distribution.high += 1,
                Priority::Medium => summary.priority_distribution.medium += 1,
                Priority::Low => summary.priority_distribution.low += 1,
            }
        }
        summary.pending = summary.total - summary.completed;
        summary
    }

    fn completion_rate(&self) -> u32 {
        completion_percentage(self.completed, self.total)
    }
}

/// Builds the dashboard summary as of `now`
///
/// Callers pass only the requester's rows; nothing is filtered here.
pub fn dashboard(projects: &[Project], tasks: &[Task], todos: &[Todo], now: DateTime<Utc>) -> DashboardStats {
    let recent_since = now - Duration::days(RECENT_WINDOW_DAYS);
    let is_recent = |created_at: DateTime<Utc>| created_at >= recent_since;

    let mut status_distribution = StatusDistribution::default();
    for project in projects {
        match project.status {
            ProjectStatus::Active => status_distribution.active += 1,
            ProjectStatus::Completed => status_distribution.completed += 1,
            ProjectStatus::OnHold => status_distribution.on_hold += 1,
        }
    }

    let task_summary = WorkSummary::collect(
        tasks.iter().map(|t| WorkItem {
            completed: t.completed,
            due_date: t.due_date,
            priority: t.priority,
        }),
        now,
    );
    let todo_summary = WorkSummary::collect(
        todos.iter().map(|t| WorkItem {
            completed: t.completed,
            due_date: t.due_date,
            priority: t.priority,
        }),
        now,
    );

    DashboardStats {
        projects: ProjectSummary {
            total: projects.len(),
            active: status_distribution.active,
            completed: status_distribution.completed,
            status_distribution,
        },
        recent_activity: RecentActivity {
            projects: projects.iter().filter(|p| is_recent(p.created_at)).count(),
            tasks: tasks.iter().filter(|t| is_recent(t.created_at)).count(),
            todos: todos.iter().filter(|t| is_recent(t.created_at)).count(),
        },
        completion_rate: CompletionRate {
            tasks: task_summary.completion_rate(),
            todos: todo_summary.completion_rate(),
        },
        tasks: task_summary,
        todos: todo_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(completed: bool, due_date: DateTime<Utc>, created_at: DateTime<Utc>, priority: Priority) -> Task {
        Task {
            id: Uuid::new_v4(),
            name: "task".to_string(),
            description: None,
            module_name: "core".to_string(),
            due_date,
            completed,
            priority,
            project_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            created_at,
            updated_at: created_at,
        }
    }

    fn todo(completed: bool, due_date: DateTime<Utc>) -> Todo {
        todo_with_estimate(completed, due_date, 0.0)
    }

    fn todo_with_estimate(completed: bool, due_date: DateTime<Utc>, estimated_time: f64) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            title: "todo".to_string(),
            description: None,
            completed,
            due_date,
            priority: Priority::Medium,
            estimated_time,
            task_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            created_at: due_date,
            updated_at: due_date,
        }
    }

    fn project(status: ProjectStatus, created_at: DateTime<Utc>) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "project".to_string(),
            description: None,
            eta: created_at,
            status,
            owner_id: Uuid::new_v4(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_completion_percentage_rounding() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 1), 100);
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(1, 7), 14);
        assert_eq!(completion_percentage(4, 7), 57);
    }

    #[test]
    fn test_completion_percentage_bounds() {
        for total in [0usize, 1, 2, 3, 7] {
            for completed in 0..=total {
                let pct = completion_percentage(completed, total);
                assert!(pct <= 100);
                if total > 0 && completed == total {
                    assert_eq!(pct, 100);
                }
            }
        }
    }

    #[test]
    fn test_project_stats() {
        let now = Utc::now();
        let tasks = vec![
            task(true, now, now, Priority::Low),
            task(false, now, now, Priority::Low),
            task(false, now, now, Priority::Low),
        ];

        let stats = project_stats(&tasks);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.completion_percentage, 33);

        assert_eq!(project_stats(&[]), ProjectStats::default());
    }

    #[test]
    fn test_task_stats() {
        let now = Utc::now();
        let stats = task_stats(&[
            todo_with_estimate(true, now, 1.5),
            todo_with_estimate(true, now, 2.0),
            todo(false, now),
        ]);
        assert_eq!(stats.total_todos, 3);
        assert_eq!(stats.completed_todos, 2);
        assert_eq!(stats.total_estimated_time, 3.5);

        assert_eq!(task_stats(&[]), TaskStats::default());
    }

    #[test]
    fn test_dashboard_overdue_and_recent() {
        let now = Utc::now();
        let yesterday = now - Duration::days(1);
        let tomorrow = now + Duration::days(1);
        let long_ago = now - Duration::days(30);

        let projects = vec![
            project(ProjectStatus::Active, yesterday),
            project(ProjectStatus::OnHold, long_ago),
            project(ProjectStatus::Completed, long_ago),
        ];
        let tasks = vec![
            // overdue
            task(false, yesterday, long_ago, Priority::High),
            // completed tasks are never overdue
            task(true, yesterday, yesterday, Priority::High),
            task(false, tomorrow, yesterday, Priority::Low),
        ];
        let todos = vec![todo(false, yesterday), todo(true, long_ago)];

        let stats = dashboard(&projects, &tasks, &todos, now);

        assert_eq!(stats.projects.total, 3);
        assert_eq!(stats.projects.active, 1);
        assert_eq!(stats.projects.completed, 1);
        assert_eq!(stats.projects.status_distribution.on_hold, 1);

        assert_eq!(stats.tasks.total, 3);
        assert_eq!(stats.tasks.completed, 1);
        assert_eq!(stats.tasks.pending, 2);
        assert_eq!(stats.tasks.overdue, 1);
        assert_eq!(stats.tasks.priority_distribution.high, 2);
        assert_eq!(stats.tasks.priority_distribution.low, 1);

        assert_eq!(stats.todos.overdue, 1);
        assert_eq!(stats.todos.priority_distribution.medium, 2);

        assert_eq!(stats.recent_activity.projects, 1);
        assert_eq!(stats.recent_activity.tasks, 2);
        assert_eq!(stats.recent_activity.todos, 1);

        assert_eq!(stats.completion_rate.tasks, 33);
        assert_eq!(stats.completion_rate.todos, 50);
    }

    #[test]
    fn test_dashboard_recent_window_is_inclusive() {
        let now = DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let edge = now - Duration::days(RECENT_WINDOW_DAYS);
        let just_outside = edge - Duration::milliseconds(1);

        let projects = vec![
            project(ProjectStatus::Active, edge),
            project(ProjectStatus::Active, just_outside),
        ];
        let tasks = vec![
            task(false, now, edge, Priority::Low),
            task(false, now, just_outside, Priority::Low),
        ];

        let stats = dashboard(&projects, &tasks, &[], now);
        assert_eq!(stats.recent_activity.projects, 1);
        assert_eq!(stats.recent_activity.tasks, 1);
    }

    #[test]
    fn test_dashboard_due_now_is_not_overdue() {
        let now = DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let a_moment_ago = now - Duration::milliseconds(1);

        let tasks = vec![
            task(false, now, now, Priority::High),
            task(false, a_moment_ago, now, Priority::High),
        ];
        let todos = vec![todo(false, now), todo(false, a_moment_ago)];

        let stats = dashboard(&[], &tasks, &todos, now);
        assert_eq!(stats.tasks.overdue, 1);
        assert_eq!(stats.todos.overdue, 1);
    }

    #[test]
    fn test_dashboard_empty() {
        let stats = dashboard(&[], &[], &[], Utc::now());
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_dashboard_json_shape() {
        let json = serde_json::to_value(dashboard(&[], &[], &[], Utc::now())).unwrap();
        assert!(json["projects"]["statusDistribution"]["onHold"].is_number());
        assert!(json["tasks"]["priorityDistribution"]["high"].is_number());
        assert!(json["recentActivity"]["todos"].is_number());
        assert!(json["completionRate"]["tasks"].is_number());
    }
}
