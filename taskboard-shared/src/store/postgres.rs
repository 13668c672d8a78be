/// PostgreSQL entity store
///
/// Predicates are assembled with `sqlx::QueryBuilder` so every filter value
/// is sent as a bind parameter. Partial updates use `COALESCE` so a single
/// statement handles any combination of changed fields.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::filter::ProjectFilter;
/// use taskboard_shared::store::{EntityStore, PgStore};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// let projects = store.find_projects(&ProjectFilter::for_owner(Uuid::new_v4())).await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::{EntityStore, StoreResult};
use crate::filter::{DateRange, ProjectFilter, TaskFilter, TodoFilter};
use crate::models::{CreateProject, CreateTask, CreateTodo, Project, Task, Todo};
use crate::models::{UpdateProject, UpdateTask, UpdateTodo};

const PROJECT_COLUMNS: &str =
    "id, name, description, eta, status, owner_id, created_at, updated_at";

const TASK_COLUMNS: &str = "id, name, description, module_name, due_date, completed, priority, \
                            project_id, owner_id, created_at, updated_at";

const TODO_COLUMNS: &str = "id, title, description, completed, due_date, priority, estimated_time, \
                            task_id, owner_id, created_at, updated_at";

/// Absent keeps the stored description, blank clears it
const DESCRIPTION_UPDATE: &str = "description = NULLIF(COALESCE($3, description), '')";

/// Entity store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn push_date_range(qb: &mut QueryBuilder<'_, Postgres>, column: &str, range: &DateRange) {
    if let Some(from) = range.from {
        qb.push(format!(" AND {} >= ", column)).push_bind(from);
    }
    if let Some(to) = range.to {
        qb.push(format!(" AND {} <= ", column)).push_bind(to);
    }
}

fn push_task_predicates(qb: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(project_id) = filter.project_id {
        qb.push(" AND project_id = ").push_bind(project_id);
    }
    if let Some(completed) = filter.completed {
        qb.push(" AND completed = ").push_bind(completed);
    }
    if let Some(priority) = &filter.priority {
        qb.push(" AND priority::text = ").push_bind(priority.clone());
    }
    push_date_range(qb, "due_date", &filter.due);
}

fn push_todo_predicates(qb: &mut QueryBuilder<'_, Postgres>, filter: &TodoFilter) {
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(task_id) = filter.task_id {
        qb.push(" AND task_id = ").push_bind(task_id);
    }
    if let Some(task_ids) = &filter.task_ids {
        qb.push(" AND task_id = ANY(").push_bind(task_ids.clone()).push(")");
    }
    if let Some(completed) = filter.completed {
        qb.push(" AND completed = ").push_bind(completed);
    }
    if let Some(priority) = &filter.priority {
        qb.push(" AND priority::text = ").push_bind(priority.clone());
    }
    push_date_range(qb, "due_date", &filter.due);
    push_date_range(qb, "created_at", &filter.created);
}

#[async_trait]
impl EntityStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM projects WHERE TRUE", PROJECT_COLUMNS));
        if let Some(owner_id) = filter.owner_id {
            qb.push(" AND owner_id = ").push_bind(owner_id);
        }
        qb.push(" ORDER BY created_at DESC");

        debug!(sql = qb.sql(), "Querying projects");
        let projects = qb.build_query_as::<Project>().fetch_all(&self.pool).await?;
        Ok(projects)
    }

    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn insert_project(&self, owner_id: Uuid, data: &CreateProject) -> StoreResult<Project> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, description, eta, status, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.eta)
        .bind(data.status)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn update_project(&self, id: Uuid, changes: &UpdateProject) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                name = COALESCE($2, name),
                {},
                eta = COALESCE($4, eta),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DESCRIPTION_UPDATE, PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.eta)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM tasks WHERE TRUE", TASK_COLUMNS));
        push_task_predicates(&mut qb, filter);
        qb.push(" ORDER BY due_date ASC, created_at DESC");

        debug!(sql = qb.sql(), "Querying tasks");
        let tasks = qb.build_query_as::<Task>().fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn insert_task(&self, owner_id: Uuid, data: &CreateTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (name, description, module_name, due_date, completed, priority, project_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.module_name)
        .bind(data.due_date)
        .bind(data.completed)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update_task(&self, id: Uuid, changes: &UpdateTask) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks SET
                name = COALESCE($2, name),
                {},
                module_name = COALESCE($4, module_name),
                due_date = COALESCE($5, due_date),
                completed = COALESCE($6, completed),
                priority = COALESCE($7, priority),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DESCRIPTION_UPDATE, TASK_COLUMNS
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.module_name)
        .bind(changes.due_date)
        .bind(changes.completed)
        .bind(changes.priority)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_tasks(&self, filter: &TaskFilter) -> StoreResult<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM tasks WHERE TRUE");
        push_task_predicates(&mut qb, filter);

        let result = qb.build().execute(&self.pool).await?;
        debug!(removed = result.rows_affected(), "Deleted tasks");
        Ok(result.rows_affected())
    }

    async fn find_todos(&self, filter: &TodoFilter) -> StoreResult<Vec<Todo>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM todos WHERE TRUE", TODO_COLUMNS));
        push_todo_predicates(&mut qb, filter);
        qb.push(" ORDER BY due_date ASC, created_at DESC");

        debug!(sql = qb.sql(), "Querying todos");
        let todos = qb.build_query_as::<Todo>().fetch_all(&self.pool).await?;
        Ok(todos)
    }

    async fn get_todo(&self, id: Uuid) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(&format!("SELECT {} FROM todos WHERE id = $1", TODO_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(todo)
    }

    async fn insert_todo(&self, owner_id: Uuid, data: &CreateTodo) -> StoreResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            INSERT INTO todos (title, description, completed, due_date, priority, estimated_time, task_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TODO_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .bind(data.due_date)
        .bind(data.priority)
        .bind(data.estimated_time.unwrap_or(0.0))
        .bind(data.task_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, changes: &UpdateTodo) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            UPDATE todos SET
                title = COALESCE($2, title),
                {},
                completed = COALESCE($4, completed),
                due_date = COALESCE($5, due_date),
                priority = COALESCE($6, priority),
                estimated_time = COALESCE($7, estimated_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DESCRIPTION_UPDATE, TODO_COLUMNS
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.completed)
        .bind(changes.due_date)
        .bind(changes.priority)
        .bind(changes.estimated_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn delete_todo(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_todos(&self, filter: &TodoFilter) -> StoreResult<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM todos WHERE TRUE");
        push_todo_predicates(&mut qb, filter);

        let result = qb.build().execute(&self.pool).await?;
        debug!(removed = result.rows_affected(), "Deleted todos");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_task_predicates_sql() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM tasks WHERE TRUE");
        let filter = TaskFilter {
            owner_id: Some(Uuid::new_v4()),
            completed: Some(true),
            priority: Some("high".to_string()),
            ..Default::default()
        };
        push_task_predicates(&mut qb, &filter);

        assert_eq!(
            qb.sql(),
            "SELECT id FROM tasks WHERE TRUE AND owner_id = $1 AND completed = $2 AND priority::text = $3"
        );
    }

    #[test]
    fn test_todo_predicates_sql() {
        let mut qb = QueryBuilder::<Postgres>::new("DELETE FROM todos WHERE TRUE");
        let filter = TodoFilter {
            task_ids: Some(vec![Uuid::new_v4()]),
            created: DateRange {
                from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                to: None,
            },
            ..Default::default()
        };
        push_todo_predicates(&mut qb, &filter);

        assert_eq!(
            qb.sql(),
            "DELETE FROM todos WHERE TRUE AND task_id = ANY($1) AND created_at >= $2"
        );
    }
}
