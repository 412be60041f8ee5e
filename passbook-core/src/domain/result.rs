//! Result and error types for the core library
//!
//! The taxonomy separates storage failures (I/O, constraint violations),
//! authentication outcomes, and input validation so the CLI can give each
//! its own user-facing message instead of a generic failure.

use thiserror::Error;

/// Why an authenticate call did not produce a session.
///
/// `NotFound` and `PasswordMismatch` are deliberately distinct: the store is
/// queried by name first and the digest compared second, so the caller can
/// tell "no such holder" from "wrong password".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("the requested account holder was not found")]
    NotFound,

    #[error("the password did not match")]
    PasswordMismatch,
}

/// Input validation failures. Always raised before any write happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the passwords did not match")]
    PasswordMismatch,

    #[error("the password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("amount out of range: {reason}")]
    AmountOutOfRange { reason: String },

    #[error("the {field} cannot be empty")]
    EmptyName { field: &'static str },
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to initialize storage: {0}")]
    StorageInit(String),

    #[error("failed to read from storage: {0}")]
    StorageRead(String),

    #[error("failed to write to storage: {0}")]
    StorageWrite(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthFailure),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("another passbook session is already running")]
    SessionLocked,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a storage initialization error
    pub fn storage_init(msg: impl ToString) -> Self {
        Self::StorageInit(msg.to_string())
    }

    /// Create a storage read error
    pub fn storage_read(msg: impl ToString) -> Self {
        Self::StorageRead(msg.to_string())
    }

    /// Create a storage write error
    pub fn storage_write(msg: impl ToString) -> Self {
        Self::StorageWrite(msg.to_string())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True if this error is an expected, user-recoverable authentication
    /// or validation outcome rather than an infrastructure failure.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Validation(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_are_distinct() {
        assert_ne!(AuthFailure::NotFound, AuthFailure::PasswordMismatch);
        assert_ne!(
            AuthFailure::NotFound.to_string(),
            AuthFailure::PasswordMismatch.to_string()
        );
    }

    #[test]
    fn test_user_recoverable_classification() {
        assert!(Error::from(AuthFailure::NotFound).is_user_recoverable());
        assert!(Error::from(ValidationError::PasswordMismatch).is_user_recoverable());
        assert!(!Error::storage_read("disk on fire").is_user_recoverable());
        assert!(!Error::config("no salt").is_user_recoverable());
    }

    #[test]
    fn test_validation_messages_name_the_bound() {
        let err = ValidationError::PasswordTooShort { min: 8 };
        assert!(err.to_string().contains('8'));
    }
}
