use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::task::errors::SearchTermError;
use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskIdError;
use crate::domain::task::errors::TaskStatusError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::user::models::UserId;

/// Task aggregate entity.
///
/// Always belongs to exactly one user; `owner_id` is set at creation and
/// never reassigned.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub status: TaskStatus,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Task unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new random task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type. Must not be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// # Errors
    /// * `Empty` - Title is an empty string
    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        if title.is_empty() {
            return Err(TaskTitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task description value type. Must not be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// # Errors
    /// * `Empty` - Description is an empty string
    pub fn new(description: String) -> Result<Self, TaskDescriptionError> {
        if description.is_empty() {
            return Err(TaskDescriptionError::Empty);
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Done];

    /// Canonical upper-case name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Comma separated list of the accepted names.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(TaskStatus::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for TaskStatus {
    type Err = TaskStatusError;

    /// Matches case-insensitively, so `done` parses as `DONE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| TaskStatusError::Invalid {
                value: s.to_string(),
                allowed: Self::allowed_values(),
            })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substring searched for in task titles and descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// # Errors
    /// * `Empty` - Search term is an empty string
    pub fn new(term: String) -> Result<Self, SearchTermError> {
        if term.is_empty() {
            return Err(SearchTermError::Empty);
        }
        Ok(Self(term))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional criteria narrowing a task listing.
///
/// Both criteria are combined with AND; the search term matches title OR
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub search: Option<SearchTerm>,
}

/// Command to create a task with validated fields
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: TaskDescription,
}

impl CreateTaskCommand {
    pub fn new(title: TaskTitle, description: TaskDescription) -> Self {
        Self { title, description }
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<TaskDescription>,
    pub status: Option<TaskStatus>,
}

impl UpdateTaskCommand {
    /// Update touching only the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
