//! # Embedded Provider
//!
//! [`EmbeddedFs`] serves files compiled into the binary with
//! [`include_dir`]. The bundle never changes at runtime, which makes it the
//! natural base of a chain with a live directory appended on top.

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;

use include_dir::{Dir, DirEntry as BundleEntry};

use crate::path::{base_name, clean, segments};
use crate::{DirEntry, File, FileSystem, FileType, FsError, Metadata, Permissions};

/// A provider backed by a compiled-in directory tree.
///
/// An optional prefix selects a subtree of the bundle, so that a request for
/// `/index.html` with prefix `bindata` looks up `bindata/index.html`.
///
/// # Example
///
/// ```rust
/// use chainedfs::{EmbeddedFs, FileSystem};
/// use include_dir::{Dir, DirEntry, File};
///
/// static ASSETS: Dir<'static> = Dir::new("", &[
///     DirEntry::File(File::new("index.html", b"<h1>bundled</h1>")),
/// ]);
///
/// let bundle = EmbeddedFs::new(&ASSETS);
/// assert!(bundle.open("/index.html").is_ok());
/// assert!(bundle.open("/missing.html").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedFs {
    bundle: &'static Dir<'static>,
    prefix: String,
}

impl EmbeddedFs {
    /// Serve the whole bundle.
    pub fn new(bundle: &'static Dir<'static>) -> Self {
        Self {
            bundle,
            prefix: String::new(),
        }
    }

    /// Serve only the subtree under `prefix`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = segments(&clean(prefix)).collect::<Vec<_>>().join("/");
        self
    }

    fn key(&self, cleaned: &str) -> String {
        segments(&self.prefix)
            .chain(segments(cleaned))
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl FileSystem for EmbeddedFs {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        let cleaned = clean(path);
        let key = self.key(&cleaned);
        let name = base_name(&cleaned).to_owned();

        if key.is_empty() {
            return Ok(Box::new(EmbeddedFile::dir(name, self.bundle)));
        }
        match self.bundle.get_entry(&key) {
            Some(BundleEntry::File(file)) => {
                Ok(Box::new(EmbeddedFile::file(name, file.contents())))
            }
            Some(BundleEntry::Dir(dir)) => Ok(Box::new(EmbeddedFile::dir(name, dir))),
            None => Err(FsError::NotFound {
                path: PathBuf::from(cleaned),
            }),
        }
    }
}

/// Handle to an entry opened by [`EmbeddedFs`].
///
/// Reading a directory handle yields no bytes.
#[derive(Debug)]
pub struct EmbeddedFile {
    name: String,
    contents: Cursor<&'static [u8]>,
    dir: Option<&'static Dir<'static>>,
}

impl EmbeddedFile {
    fn file(name: String, contents: &'static [u8]) -> Self {
        Self {
            name,
            contents: Cursor::new(contents),
            dir: None,
        }
    }

    fn dir(name: String, dir: &'static Dir<'static>) -> Self {
        Self {
            name,
            contents: Cursor::new(b"".as_slice()),
            dir: Some(dir),
        }
    }
}

impl Read for EmbeddedFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.contents.read(buf)
    }
}

impl Seek for EmbeddedFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.contents.seek(pos)
    }
}

impl File for EmbeddedFile {
    fn stat(&self) -> Result<Metadata, FsError> {
        let (file_type, permissions) = match self.dir {
            Some(_) => (FileType::Directory, Permissions::readonly_dir()),
            None => (FileType::File, Permissions::readonly_file()),
        };
        Ok(Metadata {
            name: self.name.clone(),
            file_type,
            size: self.contents.get_ref().len() as u64,
            permissions,
            ..Default::default()
        })
    }

    fn read_dir(&mut self) -> Result<Vec<DirEntry>, FsError> {
        let dir = self.dir.ok_or_else(|| FsError::NotADirectory {
            path: PathBuf::from(&self.name),
        })?;

        let mut entries: Vec<DirEntry> = dir
            .entries()
            .iter()
            .map(|entry| {
                let name = entry
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match entry {
                    BundleEntry::File(file) => DirEntry {
                        name,
                        file_type: FileType::File,
                        size: file.contents().len() as u64,
                    },
                    BundleEntry::Dir(_) => DirEntry {
                        name,
                        file_type: FileType::Directory,
                        size: 0,
                    },
                }
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
