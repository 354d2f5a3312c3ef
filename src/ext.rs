//! # Extension Traits
//!
//! Convenience methods for any provider.
//!
//! ## Overview
//!
//! [`FileSystemExt`] is blanket-implemented for every [`FileSystem`], chains
//! included, so these methods are available everywhere without extra work.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read`](FileSystemExt::read) | Open and read the whole file |
//! | [`read_to_string`](FileSystemExt::read_to_string) | Same, as UTF-8 |
//! | [`exists`](FileSystemExt::exists) | Whether `open` would succeed |
//! | [`overlay`](FileSystemExt::overlay) | Stack another provider on top |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, `FileSystemExtJson::read_json` reads and
//! deserializes a JSON file.

use std::io::Read;
use std::path::PathBuf;

use crate::{ChainedFileSystem, FileSystem, FsError};

/// Extension methods for any provider.
///
/// # Example
///
/// ```rust
/// use chainedfs::{FileSystem, FileSystemExt, FsError};
///
/// fn banner<F: FileSystem>(fs: &F) -> Result<String, FsError> {
///     if fs.exists("/banner.txt") {
///         fs.read_to_string("/banner.txt")
///     } else {
///         Ok(String::new())
///     }
/// }
/// ```
pub trait FileSystemExt: FileSystem {
    /// Open `path` and read it to the end.
    ///
    /// # Errors
    ///
    /// - Any error from [`open`](FileSystem::open)
    /// - [`FsError::Io`] if reading the opened handle fails
    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let mut file = self.open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| FsError::io("read", path, e))?;
        Ok(data)
    }

    /// Open `path` and read it as UTF-8.
    ///
    /// # Errors
    ///
    /// - Any error from [`read`](Self::read)
    /// - [`FsError::InvalidData`] if the file isn't valid UTF-8
    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        let data = self.read(path)?;
        String::from_utf8(data).map_err(|_| FsError::InvalidData {
            path: PathBuf::from(path),
            details: "not valid UTF-8".into(),
        })
    }

    /// Returns `true` if `open(path)` succeeds.
    ///
    /// The opened handle is dropped immediately.
    fn exists(&self, path: &str) -> bool {
        self.open(path).is_ok()
    }

    /// Build a two-provider chain with `upper` probed before `self`.
    ///
    /// Equivalent to `ChainedFileSystem::new(vec![self, upper])`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chainedfs::{DirFs, FileSystemExt};
    ///
    /// let chain = DirFs::new("/usr/share/app").overlay(DirFs::new("/etc/app"));
    /// assert_eq!(chain.len(), 2);
    /// ```
    fn overlay<U>(self, upper: U) -> ChainedFileSystem
    where
        Self: Sized + 'static,
        U: FileSystem + 'static,
    {
        ChainedFileSystem::new(vec![Box::new(self), Box::new(upper)])
    }
}

impl<F: FileSystem + ?Sized> FileSystemExt for F {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde::de::DeserializeOwned;

    /// JSON extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FileSystemExtJson: FileSystem {
        /// Read a file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - Any error from [`FileSystemExt::read`]
        /// - [`FsError::InvalidData`] if JSON parsing failed
        ///
        /// # Example
        ///
        /// ```rust
        /// use chainedfs::{FileSystem, FsError};
        /// #[cfg(feature = "serde")]
        /// use chainedfs::FileSystemExtJson;
        ///
        /// #[cfg(feature = "serde")]
        /// fn load_config<F: FileSystem>(fs: &F) -> Result<serde_json::Value, FsError> {
        ///     fs.read_json("/config.json")
        /// }
        /// ```
        fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FsError> {
            let data = self.read(path)?;
            serde_json::from_slice(&data).map_err(|e| FsError::InvalidData {
                path: PathBuf::from(path),
                details: e.to_string(),
            })
        }
    }

    impl<F: FileSystem + ?Sized> FileSystemExtJson for F {}
}

#[cfg(feature = "serde")]
pub use json::FileSystemExtJson;
