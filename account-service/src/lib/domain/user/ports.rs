use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for account registration and login.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<UserId, UserError>;

    /// Check submitted credentials.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// The matching user entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Persist new user to storage.
    ///
    /// Implementations enforce email uniqueness themselves, since the
    /// service's lookup and this call are not atomic.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Identifier of the persisted user
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<UserId, UserError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce a salted hash of a non-empty plaintext password.
    fn hash(&self, password: &str) -> Result<String, UserError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, UserError>;
}
