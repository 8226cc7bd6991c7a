//! Error types for the client library.

use std::fmt;

use adp_common::ConfigError;
use thiserror::Error;

/// Every problem found while validating credential inputs.
///
/// Checks do not stop at the first failure, so a caller that passed two bad
/// paths learns about both at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Records one failure.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// All recorded failures in the order they were found.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns `true` when nothing failed.
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Converts into a result: `Ok` when empty, otherwise a
    /// [`ClientError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns the collected failures when there is at least one.
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors that can occur when talking to the ADP API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Credential inputs are unusable, e.g. missing certificate or key files.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// The certificate/key pair could not be read or loaded into a TLS client.
    #[error("Certificate error: {0}")]
    Certificate(String),

    /// The token endpoint refused the credential.
    ///
    /// Carries the response body so the server's reason is not lost.
    #[error("Unable to retrieve access token: {0}")]
    Authentication(String),

    /// Network or HTTP request failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body was not the JSON shape we expect.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An API call answered with a status outside 2xx.
    #[error("Invalid request. Status code: {status}")]
    HttpStatus {
        /// Numeric HTTP status.
        status: u16,
    },

    /// A request needed a bearer token before `authenticate()` succeeded.
    #[error("Not authenticated: authenticate() must succeed before making requests")]
    NotAuthenticated,

    /// Client configuration issue.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A streaming listing was cancelled through its cancellation token.
    #[error("Worker listing cancelled")]
    Cancelled,

    /// The background producer of a streaming listing panicked or was aborted.
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl ClientError {
    /// The HTTP status carried by this error, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub const fn is_authentication_error(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::NotAuthenticated)
    }

    /// Check if this error means the requested resource does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404 })
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ClientError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}
