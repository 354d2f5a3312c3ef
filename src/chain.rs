//! # Chained File System
//!
//! Tries an ordered list of providers until one of them opens the path.
//!
//! ## Probe Order
//!
//! Providers are probed in **reverse** of the order they were supplied:
//!
//! ```text
//! supplied:  [A, B, C]
//! probed:     C → B → A
//! ```
//!
//! List the base provider first and append overrides after it. Appending a
//! provider raises its priority without reordering the existing entries.
//! Prepending an override instead silently turns it into the final fallback.
//!
//! ## Failure
//!
//! When every provider fails, [`open`](FileSystem::open) returns
//! [`FsError::DoesNotExist`] and drops the individual errors. Use
//! [`ChainedFileSystem::open_traced`] to keep them.

use std::fmt;

use crate::{ChainError, File, FileSystem, FsError, ProbeFailure};

/// A provider composed of other providers, probed last-to-first.
///
/// The chain is fixed at construction; there is no way to add, remove or
/// reorder providers afterwards.
///
/// # Example
///
/// ```rust
/// use chainedfs::{ChainedFileSystem, DirFs, FileSystem};
///
/// let base = DirFs::new("/usr/share/app/static");
/// let overrides = DirFs::new("/etc/app/static");
///
/// // `overrides` was supplied last, so it is probed first.
/// let chain = ChainedFileSystem::new(vec![Box::new(base), Box::new(overrides)]);
/// assert_eq!(chain.len(), 2);
/// ```
#[derive(Default)]
pub struct ChainedFileSystem {
    chain: Vec<Box<dyn FileSystem>>,
}

impl ChainedFileSystem {
    /// Create a chain from providers in ascending priority.
    pub fn new(chain: Vec<Box<dyn FileSystem>>) -> Self {
        Self { chain }
    }

    /// Number of providers in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Like [`open`](FileSystem::open), but keeps every provider's error.
    ///
    /// Probe order and short-circuiting are identical to `open`; only the
    /// failure value differs.
    ///
    /// # Errors
    ///
    /// - [`ChainError`] listing each provider's failure in probe order
    pub fn open_traced(&self, path: &str) -> Result<Box<dyn File>, ChainError> {
        let mut failures = Vec::new();
        for (index, fs) in self.chain.iter().enumerate().rev() {
            match fs.open(path) {
                Ok(file) => return Ok(file),
                Err(error) => failures.push(ProbeFailure { index, error }),
            }
        }
        Err(ChainError {
            path: path.to_owned(),
            failures,
        })
    }
}

impl FileSystem for ChainedFileSystem {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        for fs in self.chain.iter().rev() {
            if let Ok(file) = fs.open(path) {
                return Ok(file);
            }
        }
        Err(FsError::DoesNotExist)
    }
}

impl FromIterator<Box<dyn FileSystem>> for ChainedFileSystem {
    fn from_iter<I: IntoIterator<Item = Box<dyn FileSystem>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for ChainedFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedFileSystem")
            .field("len", &self.chain.len())
            .finish_non_exhaustive()
    }
}
