use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticationServicePort;
use crate::user::ports::PasswordHasher;
use crate::user::ports::UserRepository;

/// Domain service for account registration and login.
///
/// Stateless between calls; the repository and hasher are injected.
pub struct AuthenticationService<UR, PH>
where
    UR: UserRepository,
    PH: PasswordHasher,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
}

impl<UR, PH> AuthenticationService<UR, PH>
where
    UR: UserRepository,
    PH: PasswordHasher,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Password hashing implementation
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR, PH> AuthenticationServicePort for AuthenticationService<UR, PH>
where
    UR: UserRepository,
    PH: PasswordHasher,
{
    #[tracing::instrument(skip_all, fields(email = %command.email))]
    async fn register(&self, command: CreateUserCommand) -> Result<UserId, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!("Registration rejected, email already in use");
            return Err(UserError::EmailAlreadyInUse);
        }

        let hasher = Arc::clone(&self.password_hasher);
        let password = command.password;
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user_id = self.repository.create(user).await?;
        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }

    #[tracing::instrument(skip_all, fields(email = %command.email))]
    async fn login(&self, command: LoginCommand) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!("Login failed");
            return Err(UserError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.password_hasher);
        let password = command.password;
        let password_hash = user.password_hash.clone();
        let verified = run_blocking(move || hasher.verify(&password, &password_hash)).await?;

        if !verified {
            tracing::info!("Login failed");
            return Err(UserError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.id, "Credentials verified");
        Ok(user)
    }
}

/// Argon2 is CPU-bound for tens of milliseconds; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, UserError>
where
    F: FnOnce() -> Result<T, UserError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| UserError::TaskFailed(e.to_string()))?
}
