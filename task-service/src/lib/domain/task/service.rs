use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use chrono::Utc;

use super::errors::TaskError;
use super::models::CreateTaskCommand;
use super::models::Task;
use super::models::TaskFilter;
use super::models::TaskId;
use super::models::TaskStatus;
use super::models::UpdateTaskCommand;
use super::ports::TaskRepository;
use super::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of TaskServicePort.
///
/// Generic over repository for testability.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    task_repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(task_repository: Arc<TR>) -> Self {
        Self { task_repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn list_tasks(
        &self,
        filter: TaskFilter,
        owner_id: UserId,
    ) -> Result<Vec<Task>, TaskError> {
        self.task_repository
            .find(&filter, owner_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    user_id = %owner_id,
                    filter = ?filter,
                    error = %e,
                    "Failed to get tasks"
                )
            })
    }

    async fn get_task(&self, id: TaskId, owner_id: UserId) -> Result<Task, TaskError> {
        self.task_repository
            .find_by_id(id, owner_id)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = %owner_id, task_id = %id, error = %e, "Failed to get task")
            })?
            .ok_or(TaskError::NotFound(id.to_string()))
    }

    async fn create_task(
        &self,
        command: CreateTaskCommand,
        owner_id: UserId,
    ) -> Result<Task, TaskError> {
        let task = Task {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
            status: TaskStatus::Open,
            owner_id,
            // Microseconds, the precision PostgreSQL keeps
            created_at: Utc::now().trunc_subsecs(6),
        };

        self.task_repository
            .create(task.clone())
            .await
            .inspect_err(|e| {
                tracing::error!(
                    user_id = %owner_id,
                    title = %task.title,
                    description = %task.description,
                    error = %e,
                    "Failed to create task"
                )
            })
    }

    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
        owner_id: UserId,
    ) -> Result<Task, TaskError> {
        if !command.is_empty() {
            self.task_repository
                .update(id, &command, owner_id)
                .await
                .inspect_err(|e| {
                    if e.is_internal() {
                        tracing::error!(
                            user_id = %owner_id,
                            task_id = %id,
                            update = ?command,
                            error = %e,
                            "Failed to update task"
                        );
                    }
                })?;
        }

        self.get_task(id, owner_id).await
    }

    async fn delete_task(&self, id: TaskId, owner_id: UserId) -> Result<(), TaskError> {
        self.task_repository
            .delete(id, owner_id)
            .await
            .inspect_err(|e| {
                if e.is_internal() {
                    tracing::error!(user_id = %owner_id, task_id = %id, error = %e, "Failed to delete task");
                }
            })
    }
}
