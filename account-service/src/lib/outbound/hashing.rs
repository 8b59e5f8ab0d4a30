use crate::domain::user::ports::PasswordHasher;
use crate::user::errors::UserError;

/// Argon2id hashing from the shared `auth` library.
impl PasswordHasher for auth::PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, UserError> {
        auth::PasswordHasher::hash(self, password).map_err(UserError::from)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        auth::PasswordHasher::verify(self, password, hash).map_err(UserError::from)
    }
}
