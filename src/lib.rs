//! # chainedfs
//!
//! Layered, read-only file providers: serve compiled-in assets, but let a live
//! directory override any of them by simply creating a file at the same path.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use chainedfs::{ChainedFileSystem, DirFs, EmbeddedFs, FileSystem};
//! use include_dir::{Dir, DirEntry, File};
//!
//! static ASSETS: Dir<'static> = Dir::new("", &[
//!     DirEntry::File(File::new("index.html", b"<h1>bundled</h1>")),
//! ]);
//!
//! let chain = ChainedFileSystem::new(vec![
//!     Box::new(EmbeddedFs::new(&ASSETS)),   // base, probed last
//!     Box::new(DirFs::new("static")),       // override, probed first
//! ]);
//!
//! let file = chain.open("/index.html")?;
//! # Ok::<(), chainedfs::FsError>(())
//! ```
//!
//! ---
//!
//! ## Probe Order
//!
//! A [`ChainedFileSystem`] probes its providers **last to first**. Append a
//! provider to give it priority over everything supplied before it. Getting
//! this backwards inverts which provider overrides which.
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FileSystem`] | Provider contract: `open(path)` |
//! | [`File`] | Open handle: read, seek, `stat`, `read_dir` |
//! | [`ChainedFileSystem`] | Provider composed of providers |
//! | [`DirFs`] | Live directory on disk |
//! | [`EmbeddedFs`] | Bundle compiled in with `include_dir` |
//! | [`FsError`] | Error type with context |
//! | [`ChainError`] | Opt-in diagnostics for an exhausted chain |
//!
//! ---
//!
//! ## Error Handling
//!
//! Providers report specific errors. A chain reports only one:
//!
//! ```rust
//! use chainedfs::{ChainedFileSystem, FileSystem, FsError};
//!
//! let chain = ChainedFileSystem::default();
//! let err = chain.open("/missing.html").unwrap_err();
//! assert!(matches!(err, FsError::DoesNotExist));
//! assert_eq!(err.to_string(), "does not exist");
//! ```
//!
//! ---
//!
//! ## Thread Safety
//!
//! [`FileSystem`] requires `Send + Sync` and `open` takes `&self`. A chain
//! holds no mutable state, so it can be shared behind an `Arc` as long as its
//! providers can.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Metadata`] and [`DirEntry`], plus `read_json` |
//! | `server` | HTTP static-file harness (`serve` module, `chainedfs-serve` binary) |

mod chain;
mod dir;
mod embedded;
mod error;
mod ext;
mod traits;
mod types;

pub mod path;

#[cfg(feature = "server")]
pub mod serve;

pub use error::{ChainError, FsError, ProbeFailure};

pub use types::{DirEntry, FileType, Metadata, Permissions};

pub use traits::{File, FileSystem};

pub use chain::ChainedFileSystem;
pub use dir::{DirFile, DirFs};
pub use embedded::{EmbeddedFile, EmbeddedFs};

pub use ext::FileSystemExt;

#[cfg(feature = "serde")]
pub use ext::FileSystemExtJson;
