//! Error taxonomy for engine operations and the command-line surface

use std::path::PathBuf;

/// Coarse classification of a [`MarbleError`]
///
/// The engine only ever produces the first four kinds; the remaining ones
/// belong to the command-line surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input to an otherwise well-formed call
    InvalidArgument,
    /// A required value was absent
    NullInput,
    /// The receiving entity's state forbids the operation
    IllegalState,
    /// Grid coordinate outside `[0, width) x [0, height)`
    OutOfBounds,
    /// File system or image encoding failure
    Io,
}

/// Main error type for all engine operations
#[derive(Debug, thiserror::Error)]
pub enum MarbleError {
    /// Malformed input (bad direction, incompatible orientation, invalid parameter)
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument {
        /// Operation that rejected the input
        operation: &'static str,
        /// Explanation of why the input is invalid
        reason: String,
    },

    /// A value was required but none was provided
    #[error("Missing value for '{parameter}'")]
    NullInput {
        /// Name of the absent parameter
        parameter: &'static str,
    },

    /// Operation invoked while the target's state forbids it
    ///
    /// Occurs for occupied or locked receptor slots, releases toward tiles
    /// that cannot take the marble, and unpaired teleporters.
    #[error("Illegal state during {operation}: {reason}")]
    IllegalState {
        /// Operation that was refused
        operation: &'static str,
        /// Description of the offending state
        reason: String,
    },

    /// Coordinate outside the grid
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a board snapshot
    #[error("Failed to export image to '{}': {source}", path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },
}

impl MarbleError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NullInput { .. } => ErrorKind::NullInput,
            Self::IllegalState { .. } => ErrorKind::IllegalState,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::FileSystem { .. } | Self::ImageExport { .. } => ErrorKind::Io,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, MarbleError>;

/// Create an invalid argument error
pub fn invalid_argument(operation: &'static str, reason: &impl ToString) -> MarbleError {
    MarbleError::InvalidArgument {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an illegal state error
pub fn illegal_state(operation: &'static str, reason: &impl ToString) -> MarbleError {
    MarbleError::IllegalState {
        operation,
        reason: reason.to_string(),
    }
}
