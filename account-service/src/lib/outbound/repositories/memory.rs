use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local UserRepository keyed by normalized email.
///
/// Used when no database is configured and by the HTTP tests. The uniqueness
/// check and the insert happen under one write lock, so concurrent
/// registrations of the same email cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<EmailAddress, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: User) -> Result<UserId, UserError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserError::EmailAlreadyInUse);
        }

        let id = user.id;
        users.insert(user.email.clone(), user);
        tracing::debug!(user_id = %id, "User stored in memory");
        Ok(id)
    }
}
