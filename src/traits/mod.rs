//! # Provider Traits
//!
//! Two traits make up the whole contract:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`FileSystem`] | A provider: `open(path)` returns a handle or an error |
//! | [`File`] | The handle: read, seek, `stat`, `read_dir`; dropped to close |
//!
//! [`ChainedFileSystem`](crate::ChainedFileSystem) implements [`FileSystem`]
//! itself, so a chain can be used anywhere a single provider is expected.
//!
//! ## Object Safety
//!
//! Both traits are object-safe:
//!
//! ```rust
//! use chainedfs::FileSystem;
//!
//! fn process(fs: &dyn FileSystem) {
//!     let _ = fs.open("/index.html");
//! }
//! ```

mod file;
mod file_system;

pub use file::File;
pub use file_system::FileSystem;
