use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user. The password hash never leaves the
/// domain/persistence boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures the username is 4-20 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// The first violated constraint, see [`Username::violations`].
    pub fn new(username: String) -> Result<Self, UsernameError> {
        match Self::violations(&username).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(Self(username)),
        }
    }

    /// Every constraint the raw username breaks, in declaration order.
    pub fn violations(username: &str) -> Vec<UsernameError> {
        let length = username.chars().count();
        let mut violations = Vec::new();

        if username.is_empty() {
            violations.push(UsernameError::Empty);
        }
        if length < Self::MIN_LENGTH {
            violations.push(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            violations.push(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        violations
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for registration.
///
/// Length 8-250, with at least one upper case letter, one lower case letter
/// and one digit or special character. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 250;

    /// Create a new password that satisfies the registration policy.
    ///
    /// # Errors
    /// The first violated constraint, see [`Password::violations`].
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        match Self::violations(&password).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(Self(password)),
        }
    }

    /// Every constraint the raw password breaks, in declaration order.
    pub fn violations(password: &str) -> Vec<PasswordPolicyError> {
        let length = password.chars().count();
        let mut violations = Vec::new();

        if password.is_empty() {
            violations.push(PasswordPolicyError::Empty);
        }
        if length < Self::MIN_LENGTH {
            violations.push(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            violations.push(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !Self::has_required_composition(password) {
            violations.push(PasswordPolicyError::WeakComposition);
        }

        violations
    }

    // Only the text after the last line break counts, and it may not start with '.'.
    fn has_required_composition(password: &str) -> bool {
        let candidate = password
            .rsplit('\n')
            .next()
            .unwrap_or_default()
            .trim_start_matches('.');

        let has_upper = candidate.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = candidate.chars().any(|c| c.is_ascii_lowercase());
        let has_digit_or_special = candidate
            .chars()
            .any(|c| c.is_ascii_digit() || !(c.is_ascii_alphanumeric() || c == '_'));

        has_upper && has_lower && has_digit_or_special
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Login credentials as submitted, before any lookup.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
