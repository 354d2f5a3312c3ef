//! Open file handles returned by providers.

use std::fmt;
use std::io::{Read, Seek};

use crate::{DirEntry, FsError, Metadata};

/// An open, read-only file or directory handle.
///
/// Handles are produced by [`FileSystem::open`](crate::FileSystem::open) and
/// owned by the caller. Dropping the handle closes it.
///
/// # Object Safety
///
/// This trait is object-safe and is always returned as `Box<dyn File>`.
pub trait File: Read + Seek + Send {
    /// Metadata of the opened entry.
    ///
    /// # Errors
    ///
    /// - [`FsError::Io`] if the provider cannot query the entry
    fn stat(&self) -> Result<Metadata, FsError>;

    /// List the entries of an opened directory, sorted by name.
    ///
    /// The default implementation is for handles that are never directories.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if the handle is a regular file
    fn read_dir(&mut self) -> Result<Vec<DirEntry>, FsError> {
        let name = self.stat()?.name;
        Err(FsError::NotADirectory { path: name.into() })
    }
}

impl fmt::Debug for dyn File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File").finish_non_exhaustive()
    }
}

impl<F: File + ?Sized> File for Box<F> {
    fn stat(&self) -> Result<Metadata, FsError> {
        (**self).stat()
    }

    fn read_dir(&mut self) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir()
    }
}
