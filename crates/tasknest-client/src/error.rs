//! Error Types
//!
//! Transport, auth, repository and storage failures.

use thiserror::Error;

/// Failure talking to the HTTP API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response reached the client
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Auth outcomes presented to the login/register screens.
///
/// `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Local rule violation or an error response carrying a message
    #[error("{0}")]
    Validation(String),

    #[error("Unable to connect to server")]
    Network,

    /// Stored token rejected at startup
    #[error("Session is no longer valid")]
    Unauthorized,
}

/// Failure of a protected list operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// 401 from the API; the session must be torn down
    #[error("Session expired")]
    Unauthorized,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Common result type for list operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Durable key-value storage failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);
