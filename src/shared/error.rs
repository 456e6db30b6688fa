//! Shared Error Types
//!
//! Errors surfaced by the client core. Nothing here is retried automatically;
//! callers decide how to recover (re-prompt for credentials, show a notice).
//!
//! # Error Categories
//!
//! - `Authentication` - sign-in or sign-up rejected, or the auth call failed
//! - `Fetch` - transport failure or non-success status on a data call
//! - `MalformedSession` - the persisted user record could not be parsed
//! - `Storage` - durable key-value storage failed
//!
//! # Usage
//!
//! ```rust
//! use studyreel::shared::error::ClientError;
//!
//! let error = ClientError::authentication("Invalid credentials");
//! assert_eq!(error.to_string(), "Invalid credentials");
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the session container, API client and library
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credentials rejected or the auth collaborator unreachable
    #[error("{message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// Data call failed
    #[error("{message}")]
    Fetch {
        /// HTTP status, absent for transport failures
        status: Option<u16>,
        /// Human-readable error message
        message: String,
    },

    /// Persisted session record is unreadable
    #[error("Stored session is malformed: {message}")]
    MalformedSession {
        /// Parser diagnostic
        message: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An authenticated call was attempted without a session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The caller abandoned the request before it resolved
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            message: message.into(),
        }
    }

    pub fn malformed_session(message: impl Into<String>) -> Self {
        Self::MalformedSession {
            message: message.into(),
        }
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the server refused the bearer token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Durable storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
