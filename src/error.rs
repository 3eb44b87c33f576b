//! Error types for namespace operations.

/// Recoverable failures reported by [`Namespace`](crate::Namespace)
/// operations. Allocation failure is not represented: the global allocator
/// aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    /// Name is longer than the configured maximum.
    #[error("name too long: {len} bytes exceeds limit of {max}")]
    NameTooLong { len: usize, max: usize },

    /// Directory already holds the maximum number of children.
    #[error("directory full: {max} entries")]
    DirectoryFull { max: usize },

    /// Creating under the parent would exceed the maximum depth.
    #[error("depth limit of {max} exceeded")]
    DepthExceeded { max: usize },

    /// A child with this name already exists in the directory.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Content operation on a directory.
    #[error("not a file: {0}")]
    NotAFile(String),

    /// Child lookup or creation under a file.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Non-recursive delete of a directory with children.
    #[error("directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// Path did not resolve.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// Name is empty or contains a path separator or whitespace.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// The node id no longer refers to a live node.
    #[error("stale node id")]
    StaleNode,

    /// The root lives as long as the namespace.
    #[error("the root directory cannot be deleted")]
    RootNotDeletable,
}

/// Convenience alias for namespace results.
pub type Result<T> = core::result::Result<T, NamespaceError>;
