//! Error types for utilkit

use thiserror::Error;

/// utilkit errors
#[derive(Error, Debug)]
pub enum Error {
    // Invocation-shape errors
    /// Worker count that would produce an empty chunk size
    ///
    /// **Triggered by:** `worker_count == 0` in a [`ParallelConfig`](crate::parallel::ParallelConfig)
    /// **Prevention:** Leave the count unset to use the available parallelism
    #[error("Invalid worker count: {count} (must be at least 1)")]
    InvalidWorkerCount {
        /// Rejected count
        count: usize,
    },

    /// More than one worker count supplied
    #[error("Only one worker count can be specified, got {given}")]
    ConflictingWorkerCounts {
        /// Number of values supplied
        given: usize,
    },

    /// Dynamic input that is neither an array nor an object
    #[error("Unsupported collection: expected array or object, got {got}")]
    UnsupportedCollection {
        /// Type name of the rejected value
        got: String,
    },

    /// Two work items share an identifier in a keyed dispatch
    #[error("Duplicate task id: {id}")]
    DuplicateTaskId {
        /// Offending identifier
        id: String,
    },

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),

    // Worker faults
    /// A worker panicked while processing a chunk
    ///
    /// Remaining chunks still run to completion before this is returned.
    #[error("Worker for chunk {chunk} panicked: {message}")]
    WorkerPanicked {
        /// Index of the chunk whose worker panicked
        chunk: usize,
        /// Panic payload rendered as text
        message: String,
    },

    // Coercion errors
    /// Type mismatch error
    ///
    /// **Triggered by:** Coercing a value of an unsupported kind
    /// **Example:** `parse_f64(Value::Null)`, `parse_bool("maybe")`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type or offending text
        got: String,
    },

    /// Numeric value outside the target range
    #[error("Value out of range for {target}: {value}")]
    OutOfRange {
        /// Target type
        target: String,
        /// Offending value
        value: String,
    },

    // Collection errors
    /// Array index out of bounds
    #[error("Index out of bounds: {index} for slice of length {length}")]
    IndexOutOfBounds {
        /// Requested index (before negative-index normalisation)
        index: isize,
        /// Slice length
        length: usize,
    },

    /// Operation on empty collection that requires elements
    #[error("Empty collection for operation: {operation}")]
    EmptyCollection {
        /// Operation name
        operation: String,
    },

    /// Key missing from a map or JSON object
    #[error("Key not found: {key}")]
    KeyNotFound {
        /// Key rendered as text
        key: String,
    },

    /// Value missing from a map
    #[error("Value not found: {value}")]
    ValueNotFound {
        /// Value rendered as text
        value: String,
    },

    /// Both maps hold the key and the strategy rejects conflicts
    #[error("Conflict detected on key: {key}")]
    MergeConflict {
        /// Conflicting key rendered as text
        key: String,
    },

    /// Filter condition not applicable to the value type
    #[error("Unsupported filter {condition} for type {type_name}")]
    UnsupportedFilter {
        /// Condition name
        condition: String,
        /// Value type name
        type_name: String,
    },

    /// JSON path segment does not point at an object
    #[error("The key '{key}' does not point to an object")]
    NotAnObject {
        /// Path segment
        key: String,
    },

    // Time errors
    /// UTC offset that chrono cannot represent
    #[error("Invalid timezone offset: {hours} hours")]
    InvalidTimezone {
        /// Offset in hours
        hours: i32,
    },

    /// strftime pattern chrono cannot render
    #[error("Invalid time format: {format:?}")]
    InvalidTimeFormat {
        /// Rejected pattern
        format: String,
    },

    // External errors
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Caller contract violation; retrying with the same input fails again
    Fatal,
    /// Transient or environment-dependent failure
    Recoverable,
    /// Data-dependent failure the caller may choose to ignore
    Warning,
}

impl Error {
    /// Create a runtime error with a message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::RuntimeError(msg.into())
    }

    pub(crate) fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::InvalidWorkerCount { .. } => ErrorSeverity::Fatal,
            Error::ConflictingWorkerCounts { .. } => ErrorSeverity::Fatal,
            Error::UnsupportedCollection { .. } => ErrorSeverity::Fatal,
            Error::DuplicateTaskId { .. } => ErrorSeverity::Fatal,
            Error::UnsupportedFilter { .. } => ErrorSeverity::Fatal,
            Error::InvalidTimezone { .. } => ErrorSeverity::Fatal,
            Error::InvalidTimeFormat { .. } => ErrorSeverity::Fatal,

            Error::PoolBuild(_) => ErrorSeverity::Recoverable,
            Error::WorkerPanicked { .. } => ErrorSeverity::Recoverable,
            Error::Io(_) => ErrorSeverity::Recoverable,

            Error::TypeError { .. } => ErrorSeverity::Warning,
            Error::IndexOutOfBounds { .. } => ErrorSeverity::Warning,
            Error::KeyNotFound { .. } => ErrorSeverity::Warning,
            Error::ValueNotFound { .. } => ErrorSeverity::Warning,

            _ => ErrorSeverity::Recoverable,
        }
    }
}

/// Result type for utilkit operations
pub type Result<T> = std::result::Result<T, Error>;
