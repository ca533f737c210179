/*!
 * Error types for the hidisub application.
 *
 * This module contains custom error types for the different conversion stages,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when parsing a cue timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// The timestamp does not have the `HH:MM:SS.mmm` shape
    #[error("Invalid timestamp format: '{0}'")]
    InvalidFormat(String),

    /// One of the fields is not a number
    #[error("Invalid {field} field in timestamp '{timestamp}'")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// The full timestamp text
        timestamp: String,
    },
}

/// Errors that can occur while converting a cue track
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The track does not follow the documented cue shape
    #[error("Format error at line {line}: {message}")]
    Format {
        /// 1-based line number in the track
        line: usize,
        /// What was expected there
        message: String,
    },

    /// A timestamp could not be parsed
    #[error("Format error at line {line}: {source}")]
    Timecode {
        /// 1-based line number in the track
        line: usize,
        /// Underlying timestamp error
        #[source]
        source: TimecodeError,
    },

    /// The run was configured in a way that cannot work
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConversionError {
    /// Shorthand for a format error at the given 1-based line
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run rather than a single file
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the conversion pipeline
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
