use thiserror::Error;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("title should not be empty")]
    Empty,
}

/// Error for TaskDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDescriptionError {
    #[error("description should not be empty")]
    Empty,
}

/// Error for TaskStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStatusError {
    #[error("\"{value}\" is an invalid status. The allowed values are: {allowed}")]
    Invalid { value: String, allowed: String },
}

/// Error for SearchTerm validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchTermError {
    #[error("search should not be empty")]
    Empty,
}

/// Top-level error for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] TaskDescriptionError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] TaskStatusError),

    #[error("Invalid search: {0}")]
    InvalidSearch(#[from] SearchTermError),

    #[error("Task with ID \"{0}\" not found")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl TaskError {
    /// True for failures that are not caused by the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, TaskError::DatabaseError(_))
    }
}
