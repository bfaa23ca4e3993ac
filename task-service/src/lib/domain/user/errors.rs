use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username should not be empty")]
    Empty,

    #[error("username must be longer than or equal to {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("username must be shorter than or equal to {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations at registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password should not be empty")]
    Empty,

    #[error("password must be longer than or equal to {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("password must be shorter than or equal to {max} characters")]
    TooLong { max: usize, actual: usize },

    #[error(
        "password must contains: 1 upper case letter; 1 lower case letter; 1 number or special character"
    )]
    WeakComposition,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl UserError {
    /// True for failures that are not caused by the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            UserError::Hashing(_) | UserError::DatabaseError(_)
        )
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
