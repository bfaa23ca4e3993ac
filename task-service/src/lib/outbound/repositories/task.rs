use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at";

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_task(row: PgRow) -> Result<Task, TaskError> {
        let status: String = row.get("status");

        Ok(Task {
            id: TaskId(row.get("id")),
            title: TaskTitle::new(row.get("title"))?,
            description: TaskDescription::new(row.get("description"))?,
            status: status
                .parse::<TaskStatus>()
                .map_err(|e| TaskError::DatabaseError(e.to_string()))?,
            owner_id: UserId(row.get("user_id")),
            created_at: row.get("created_at"),
        })
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        // The stored row is returned, timestamps rounded to the column precision
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tasks (id, title, description, status, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(task.id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.description.as_str())
        .bind(task.status.as_str())
        .bind(task.owner_id.0)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        Self::row_to_task(row)
    }

    async fn find(&self, filter: &TaskFilter, owner_id: UserId) -> Result<Vec<Task>, TaskError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM tasks WHERE user_id = ",
            TASK_COLUMNS
        ));
        query.push_bind(owner_id.0);

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search.as_str()));
            query
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR description ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }

        query.push(" ORDER BY created_at ASC, id ASC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_task).collect()
    }

    async fn find_by_id(&self, id: TaskId, owner_id: UserId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(owner_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_task).transpose()
    }

    async fn update(
        &self,
        id: TaskId,
        command: &UpdateTaskCommand,
        owner_id: UserId,
    ) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.0)
        .bind(command.title.as_ref().map(TaskTitle::as_str))
        .bind(command.description.as_ref().map(TaskDescription::as_str))
        .bind(command.status.map(|status| status.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: TaskId, owner_id: UserId) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
