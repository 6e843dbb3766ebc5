//! Error types for container operations.

use thiserror::Error;

/// Errors that can occur during container operations.
///
/// All errors are reported synchronously to the direct caller at the point
/// of detection. A failed mutating operation leaves the container in the
/// state it had immediately before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested key is not present in the container.
    ///
    /// Returned by the failing accessors (`at`, `pop`, the cache's `get`)
    /// when the key is absent and the caller supplied no default. Accessors
    /// that take a default never fail; they return the default instead.
    #[error("key not found")]
    KeyNotFound,

    /// A positional query resolved to an index outside the container.
    ///
    /// Negative indices are adjusted by the container length before the
    /// range check, so `index` here is the value as supplied by the caller.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as supplied by the caller.
        index: isize,
        /// The container length at the time of the call.
        len: usize,
    },

    /// A cache was constructed with a capacity that cannot hold any entry.
    #[error("cache capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

/// A specialized `Result` type for container operations.
pub type Result<T> = std::result::Result<T, MapError>;
