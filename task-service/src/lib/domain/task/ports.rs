use async_trait::async_trait;

use super::models::CreateTaskCommand;
use super::models::Task;
use super::models::TaskFilter;
use super::models::TaskId;
use super::models::UpdateTaskCommand;
use crate::domain::task::errors::TaskError;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
///
/// Every operation is scoped to `owner_id`. A task owned by someone else is
/// reported exactly like a missing one.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// List the owner's tasks matching `filter`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self, filter: TaskFilter, owner_id: UserId)
        -> Result<Vec<Task>, TaskError>;

    /// Retrieve one of the owner's tasks.
    ///
    /// # Errors
    /// * `NotFound` - No task with this ID belongs to the owner
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: TaskId, owner_id: UserId) -> Result<Task, TaskError>;

    /// Create a task in `OPEN` state for the owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        command: CreateTaskCommand,
        owner_id: UserId,
    ) -> Result<Task, TaskError>;

    /// Apply the provided fields and return the task as stored afterwards.
    ///
    /// # Errors
    /// * `NotFound` - No task with this ID belongs to the owner
    /// * `DatabaseError` - Database operation failed
    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
        owner_id: UserId,
    ) -> Result<Task, TaskError>;

    /// Remove one of the owner's tasks.
    ///
    /// # Errors
    /// * `NotFound` - No task with this ID belongs to the owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: TaskId, owner_id: UserId) -> Result<(), TaskError>;
}

/// Repository port for task persistence operations.
///
/// Implementations must constrain every statement to `owner_id`.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist a new task entity.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Owner's tasks matching `filter`, ordered by creation time then ID.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, filter: &TaskFilter, owner_id: UserId) -> Result<Vec<Task>, TaskError>;

    /// Retrieve task by identifier within the owner's tasks.
    ///
    /// # Returns
    /// Task entity if found, None otherwise
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: TaskId, owner_id: UserId) -> Result<Option<Task>, TaskError>;

    /// Write the provided fields of an owned task.
    ///
    /// # Errors
    /// * `NotFound` - No row matched both ID and owner
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: TaskId,
        command: &UpdateTaskCommand,
        owner_id: UserId,
    ) -> Result<(), TaskError>;

    /// Remove an owned task permanently.
    ///
    /// # Errors
    /// * `NotFound` - No row matched both ID and owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: TaskId, owner_id: UserId) -> Result<(), TaskError>;
}
