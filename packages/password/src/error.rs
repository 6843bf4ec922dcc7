//! Error handling for password hashing and verification

use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The secure random source could not supply bytes
    #[error("Random source exhausted: {0}")]
    RandomSourceExhausted(String),

    /// The stored record has the wrong shape or an undecodable field
    #[error("Malformed password record: {0}")]
    MalformedRecord(String),

    /// The record names an algorithm this crate does not know
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The candidate password does not match the stored key
    #[error("Password did not match")]
    PasswordMismatch,

    /// Cost parameters or salt rejected before derivation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The KDF reported a failure while deriving
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// The record asks for more work than the caller's limits allow
    #[error("Cost limit exceeded: {0}")]
    CostLimitExceeded(String),
}

impl PasswordError {
    /// Create a `malformed_record` error
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// True for a wrong password, as opposed to corrupt or tampered data
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::PasswordMismatch)
    }
}

/// Result type for password operations
pub type Result<T> = std::result::Result<T, PasswordError>;
