use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::SubsecRound;
use chrono::Utc;
use tokio::sync::OnceCell;
use tokio::task;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

// Plaintext behind the hash checked when a login names an unknown user.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    dummy_hash: OnceCell<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost factor
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Hashing and verification run on the blocking pool, off the request workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = self.password_hasher;
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Hashing(e.to_string()))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, UserError> {
        let hasher = self.password_hasher;
        task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Hashing(e.to_string()))?
            .map_err(UserError::from)
    }

    /// Spend one verification on a throw-away hash, so an unknown username
    /// costs as much as a wrong password.
    async fn verify_against_dummy(&self, password: String) {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
            .await;

        match dummy_hash {
            Ok(hash) => {
                let _ = self.verify_password(password, hash.clone()).await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prepare dummy password hash"),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let username = command.username;

        // The insert below still maps a unique violation to the same error when
        // a concurrent registration wins between this check and the insert.
        let username_in_use = self
            .repository
            .username_exists(username.as_str())
            .await
            .inspect_err(|e| {
                tracing::error!(username = %username, error = %e, "Failed to check username availability")
            })?;
        if username_in_use {
            return Err(UserError::UsernameAlreadyExists(username.to_string()));
        }

        let password_hash = self
            .hash_password(command.password.as_str().to_string())
            .await
            .inspect_err(|e| tracing::error!(username = %username, error = %e, "Password hashing failed"))?;

        // Microseconds, the precision PostgreSQL keeps
        let user = User {
            id: UserId::new(),
            username,
            password_hash,
            created_at: Utc::now().trunc_subsecs(6),
        };

        let created_user = self.repository.create(user).await.inspect_err(|e| {
            if e.is_internal() {
                tracing::error!(error = %e, "Failed to persist new user");
            }
        })?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn verify_credentials(
        &self,
        credentials: Credentials,
    ) -> Result<Option<User>, UserError> {
        let Some(user) = self
            .repository
            .find_by_username(&credentials.username)
            .await
            .inspect_err(|e| {
                tracing::error!(username = %credentials.username, error = %e, "Failed to look up user")
            })?
        else {
            self.verify_against_dummy(credentials.password).await;
            return Ok(None);
        };

        let matches = self
            .verify_password(credentials.password, user.password_hash.clone())
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable")
            })?;

        Ok(matches.then_some(user))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
