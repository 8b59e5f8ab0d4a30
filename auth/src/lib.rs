//! Authentication utilities library
//!
//! Provides reusable password hashing (Argon2id) for services that store
//! credentials. Each service defines its own hashing port and adapts this
//! implementation to it, so services are not coupled through shared domain
//! logic.
//!
//! # Examples
//!
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! Empty input is rejected instead of being hashed:
//!
//! ```
//! use auth::{PasswordError, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! assert!(matches!(hasher.hash(""), Err(PasswordError::InvalidInput(_))));
//! ```

pub mod password;

pub use password::PasswordError;
pub use password::PasswordHasher;
