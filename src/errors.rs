/*!
 * Error types for the subsel library.
 *
 * Selection operations themselves are total; the errors here cover the
 * optional line checks of the grid controller, document edits, script
 * parsing and the application shell, using the thiserror crate for
 * ergonomic error definitions.
 */

use thiserror::Error;

/// Errors reported by the checked selection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The line is not part of the controller's line sequence
    #[error("Line {0} is not part of the document")]
    UnknownLine(String),
}

/// Errors that can occur when editing a subtitle document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// End time does not come after the start time
    #[error("Invalid time range: end time {end_ms} <= start time {start_ms}")]
    InvalidTimeRange {
        /// Start time in milliseconds
        start_ms: u64,
        /// End time in milliseconds
        end_ms: u64,
    },

    /// Subtitle text is empty after trimming
    #[error("Empty subtitle text")]
    EmptyText,

    /// Referenced line does not exist in the collection
    #[error("No such line: {0}")]
    NoSuchLine(String),
}

/// Errors that can occur while parsing or running a selection script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A script line could not be parsed
    #[error("Script line {line}: {message}")]
    Parse {
        /// 1-based script line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A command referenced a line position outside the document
    #[error("Line position {position} is out of range (document has {len} lines)")]
    PositionOutOfRange {
        /// 1-based line position requested
        position: usize,
        /// Number of lines in the document
        len: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a selection operation
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Error from the subtitle document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from the script driver
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

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
