//! Error types for chained file providers.

use std::path::PathBuf;

/// Filesystem error type with contextual variants.
///
/// Providers report the specific variant that describes their failure.
/// [`ChainedFileSystem`](crate::ChainedFileSystem) collapses all of them into
/// [`FsError::DoesNotExist`] once every provider has been tried.
///
/// # Examples
///
/// ```rust
/// use chainedfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// assert!(err.is_not_found());
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// No provider in a chain could supply the path.
    ///
    /// Deliberately carries no detail about which provider failed or why.
    #[error("does not exist")]
    DoesNotExist,

    /// Path does not exist in a single provider.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The provider refused the path before looking it up.
    #[error("invalid path: {path} ({reason})")]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Invalid data encountered.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Convert an I/O error, keeping the operation and path as context.
    ///
    /// `NotFound` and `PermissionDenied` kinds map to their dedicated variants.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            _ => FsError::Io {
                operation,
                path,
                source,
            },
        }
    }

    /// Returns `true` for [`DoesNotExist`](Self::DoesNotExist) and
    /// [`NotFound`](Self::NotFound).
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::DoesNotExist | FsError::NotFound { .. })
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        FsError::io("io", PathBuf::new(), error)
    }
}

/// One provider's failure recorded by
/// [`ChainedFileSystem::open_traced`](crate::ChainedFileSystem::open_traced).
#[derive(Debug)]
pub struct ProbeFailure {
    /// Position of the provider in construction order.
    pub index: usize,
    /// The error the provider returned.
    pub error: FsError,
}

/// Exhausted-chain error that keeps every provider's failure.
///
/// Failures are stored in probe order, so the first entry belongs to the
/// last-supplied provider.
#[derive(Debug, thiserror::Error)]
#[error("does not exist: {path} ({} providers tried)", .failures.len())]
pub struct ChainError {
    /// The path that was requested.
    pub path: String,
    /// Each provider's failure, in probe order.
    pub failures: Vec<ProbeFailure>,
}

impl From<ChainError> for FsError {
    fn from(_: ChainError) -> Self {
        FsError::DoesNotExist
    }
}
