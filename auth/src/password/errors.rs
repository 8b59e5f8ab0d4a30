use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// A required argument was empty. Callers are expected to validate
    /// input before hashing, so this points at a wiring bug.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
