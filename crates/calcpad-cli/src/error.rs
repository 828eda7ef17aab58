//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// A key sequence character with no keypad meaning
    #[error("Invalid key '{character}' at position {position}")]
    InvalidKey {
        /// The offending character
        character: char,
        /// Zero-based character index in the sequence
        position: usize,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The HTTP client for a remote service could not be created
    #[error("HTTP client error: {message}")]
    Client {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid key error
    #[must_use]
    pub const fn invalid_key(character: char, position: usize) -> Self {
        Self::InvalidKey {
            character,
            position,
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an HTTP client error
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }
}
