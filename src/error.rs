//! Error type shared by every kernel entry point.
//!
//! All variants are raised at the boundary, before any parallel region is
//! entered. Once a traversal or sort starts on validated input it cannot fail.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by graph construction, traversals, sorts and the I/O boundary.
///
/// # Variants
///
/// - [`Error::InvalidVertex`] - a vertex id outside `[0, vertex_count)` was
///   passed to edge insertion, adjacency lookup or as a traversal start
/// - [`Error::CapacityExceeded`] - a declared vertex count is too large to
///   allocate
/// - [`Error::InvalidRange`] - inclusive sort bounds do not fit the slice
/// - [`Error::MalformedInput`] - the input provider could not produce the
///   declared number of edges or elements
/// - [`Error::Io`] - reading input or flushing output failed
/// - [`Error::ThreadPool`] - the worker pool could not be built
/// - [`Error::Config`] - configuration could not be read or is invalid
#[derive(Debug, Error)]
pub enum Error {
    /// Vertex id is out of range for the graph.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    InvalidVertex {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// The vertex table for `vertex_count` vertices could not be allocated.
    #[error("cannot allocate a graph with {vertex_count} vertices")]
    CapacityExceeded {
        /// The requested vertex count.
        vertex_count: usize,
    },

    /// Inclusive range `[lo, hi]` does not fit a slice of length `len`.
    #[error("sort range [{lo}, {hi}] is out of bounds for length {len}")]
    InvalidRange {
        /// Lower bound (inclusive).
        lo: usize,
        /// Upper bound (inclusive).
        hi: usize,
        /// Length of the slice being sorted.
        len: usize,
    },

    /// The input provider ran out of tokens or produced an unparseable one.
    #[error("malformed input: {message}")]
    MalformedInput {
        /// What was expected and what was found.
        message: String,
    },

    /// I/O failure at the input provider or output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },
}

macro_rules! malformed_input {
    ($msg:expr) => {
        $crate::Error::MalformedInput {
            message: $msg.to_string(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::MalformedInput {
            message: format!($fmt, $($arg)*),
        }
    };
}

pub(crate) use malformed_input;
