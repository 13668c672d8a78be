/// In-process entity store
///
/// Keeps all three collections in hash maps behind a single
/// `tokio::sync::RwLock`. Filters and orderings are the same as
/// [`PgStore`](super::PgStore), which makes this store a drop-in backend for
/// tests and database-less local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{by_due_date, EntityStore, StoreResult};
use crate::filter::{ProjectFilter, TaskFilter, TodoFilter};
use crate::models::{CreateProject, CreateTask, CreateTodo, Project, Task, Todo};
use crate::models::{UpdateProject, UpdateTask, UpdateTodo};

#[derive(Debug, Default)]
struct Tables {
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
    todos: HashMap<Uuid, Todo>,
}

/// Entity store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = projects.len(), "Found projects");
        Ok(projects)
    }

    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn insert_project(&self, owner_id: Uuid, data: &CreateProject) -> StoreResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            eta: data.eta,
            status: data.status,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .projects
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: Uuid, changes: &UpdateProject) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        Ok(tables.projects.get_mut(&id).map(|project| {
            changes.apply_to(project);
            project.updated_at = Utc::now();
            project.clone()
        }))
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.projects.remove(&id).is_some())
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| by_due_date((a.due_date, a.created_at), (b.due_date, b.created_at)));
        debug!(count = tasks.len(), "Found tasks");
        Ok(tasks)
    }

    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn insert_task(&self, owner_id: Uuid, data: &CreateTask) -> StoreResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            module_name: data.module_name.clone(),
            due_date: data.due_date,
            completed: data.completed,
            priority: data.priority,
            project_id: data.project_id,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, changes: &UpdateTask) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.get_mut(&id).map(|task| {
            changes.apply_to(task);
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }

    async fn delete_tasks(&self, filter: &TaskFilter) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|_, task| !filter.matches(task));
        Ok((before - tables.tasks.len()) as u64)
    }

    async fn find_todos(&self, filter: &TodoFilter) -> StoreResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        let mut todos: Vec<Todo> = tables
            .todos
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        todos.sort_by(|a, b| by_due_date((a.due_date, a.created_at), (b.due_date, b.created_at)));
        debug!(count = todos.len(), "Found todos");
        Ok(todos)
    }

    async fn get_todo(&self, id: Uuid) -> StoreResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn insert_todo(&self, owner_id: Uuid, data: &CreateTodo) -> StoreResult<Todo> {
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            completed: data.completed,
            due_date: data.due_date,
            priority: data.priority,
            estimated_time: data.estimated_time.unwrap_or(0.0),
            task_id: data.task_id,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, changes: &UpdateTodo) -> StoreResult<Option<Todo>> {
        let mut tables = self.tables.write().await;
        Ok(tables.todos.get_mut(&id).map(|todo| {
            changes.apply_to(todo);
            todo.updated_at = Utc::now();
            todo.clone()
        }))
    }

    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }

    async fn delete_todos(&self, filter: &TodoFilter) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|_, todo| !filter.matches(todo));
        Ok((before - tables.todos.len()) as u64)
    }
}
