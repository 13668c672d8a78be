/// Dashboard statistics for one user

use chrono::Utc;
use uuid::Uuid;

use super::ServiceResult;
use crate::filter::{ProjectFilter, TaskFilter, TodoFilter};
use crate::stats::{self, DashboardStats};
use crate::store::EntityStore;

/// Summarizes everything the requester owns as of now
pub async fn summary(store: &dyn EntityStore, requester: Uuid) -> ServiceResult<DashboardStats> {
    let project_filter = ProjectFilter::for_owner(requester);
    let task_filter = TaskFilter::for_owner(requester);
    let todo_filter = TodoFilter::for_owner(requester);

    let (projects, tasks, todos) = futures::try_join!(
        store.find_projects(&project_filter),
        store.find_tasks(&task_filter),
        store.find_todos(&todo_filter),
    )?;

    Ok(stats::dashboard(&projects, &tasks, &todos, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProject, CreateTask, Priority, ProjectStatus};
    use crate::store::MemoryStore;
    use chrono::Duration;

    #[tokio::test]
    async fn test_summary_counts_only_own_rows() {
        let store = MemoryStore::new();
        let (owner, other) = (Uuid::new_v4(), Uuid::new_v4());

        for user in [owner, other] {
            let project = store
                .insert_project(
                    user,
                    &CreateProject {
                        name: "P".to_string(),
                        description: None,
                        eta: Utc::now(),
                        status: ProjectStatus::Active,
                    },
                )
                .await
                .unwrap();
            store
                .insert_task(
                    user,
                    &CreateTask {
                        name: "late".to_string(),
                        description: None,
                        module_name: "m".to_string(),
                        due_date: Utc::now() - Duration::days(2),
                        completed: false,
                        priority: Priority::High,
                        project_id: project.id,
                    },
                )
                .await
                .unwrap();
        }

        let stats = summary(&store, owner).await.unwrap();
        assert_eq!(stats.projects.total, 1);
        assert_eq!(stats.projects.active, 1);
        assert_eq!(stats.tasks.total, 1);
        assert_eq!(stats.tasks.overdue, 1);
        assert_eq!(stats.tasks.priority_distribution.high, 1);
        assert_eq!(stats.recent_activity.projects, 1);
        assert_eq!(stats.todos.total, 0);
        assert_eq!(stats.completion_rate.todos, 0);
    }
}
