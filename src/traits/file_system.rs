//! The provider contract.

use std::sync::Arc;

use crate::{File, FsError};

/// A read-only source of files, addressed by slash-separated path.
///
/// All methods use `&self`. Implementations manage their own synchronization.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a provider can be shared
/// between the request handlers of a server.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FileSystem`.
///
/// # Example
///
/// ```rust
/// use chainedfs::{File, FileSystem, FsError};
/// use std::path::PathBuf;
///
/// struct Nothing;
///
/// impl FileSystem for Nothing {
///     fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
///         Err(FsError::NotFound { path: PathBuf::from(path) })
///     }
/// }
///
/// assert!(Nothing.open("/index.html").is_err());
/// ```
pub trait FileSystem: Send + Sync {
    /// Open `path` for reading.
    ///
    /// Path validation and normalization are the provider's own business.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::InvalidPath`] if the provider rejects the path
    /// - [`FsError::PermissionDenied`] if read access is denied
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        (**self).open(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        (**self).open(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        (**self).open(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Missing;

    impl FileSystem for Missing {
        fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
            Err(FsError::NotFound {
                path: PathBuf::from(path),
            })
        }
    }

    #[test]
    fn file_system_is_object_safe() {
        fn _check(_: &dyn FileSystem) {}
    }

    #[test]
    fn file_system_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FileSystem>() {
            _assert_send_sync::<T>();
        }
    }

    #[test]
    fn smart_pointers_forward_open() {
        let boxed: Box<dyn FileSystem> = Box::new(Missing);
        let shared: Arc<dyn FileSystem> = Arc::new(Missing);
        assert!(boxed.open("/a").unwrap_err().is_not_found());
        assert!(shared.open("/a").unwrap_err().is_not_found());
        assert!((&Missing).open("/a").unwrap_err().is_not_found());
    }
}
