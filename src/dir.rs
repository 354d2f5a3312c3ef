//! # Directory Provider
//!
//! [`DirFs`] serves files from a live directory tree on disk. Every `open`
//! goes to the operating system, so edits to the tree are visible on the next
//! lookup.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::path::{base_name, clean, segments};
use crate::{DirEntry, File, FileSystem, FileType, FsError, Metadata, Permissions};

/// A provider rooted at a directory on disk.
///
/// Request paths are cleaned as rooted slash paths before being joined under
/// the root, so `..` cannot reach outside of it. An empty root means the
/// current directory.
///
/// # Example
///
/// ```rust,no_run
/// use chainedfs::{DirFs, FileSystem};
///
/// let live = DirFs::new("static");
/// let file = live.open("/index.html")?;
/// # Ok::<(), chainedfs::FsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Create a provider serving the tree under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this provider serves from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<(PathBuf, String), FsError> {
        if name.contains('\0') {
            return Err(FsError::InvalidPath {
                path: PathBuf::from(name),
                reason: "NUL byte in file path",
            });
        }
        if std::path::MAIN_SEPARATOR != '/' && name.contains(std::path::MAIN_SEPARATOR) {
            return Err(FsError::InvalidPath {
                path: PathBuf::from(name),
                reason: "invalid character in file path",
            });
        }

        let cleaned = clean(name);
        let mut full = if self.root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.root.clone()
        };
        full.extend(segments(&cleaned));
        Ok((full, cleaned))
    }
}

impl FileSystem for DirFs {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        let (full, cleaned) = self.resolve(path)?;
        let file = fs::File::open(&full).map_err(|e| FsError::io("open", &full, e))?;
        Ok(Box::new(DirFile {
            name: base_name(&cleaned).to_owned(),
            path: full,
            file,
        }))
    }
}

/// Handle to a file or directory opened by [`DirFs`].
#[derive(Debug)]
pub struct DirFile {
    name: String,
    path: PathBuf,
    file: fs::File,
}

impl Read for DirFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for DirFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.file.seek(pos)
    }
}

impl File for DirFile {
    fn stat(&self) -> Result<Metadata, FsError> {
        let meta = self
            .file
            .metadata()
            .map_err(|e| FsError::io("stat", &self.path, e))?;
        Ok(Metadata {
            name: self.name.clone(),
            file_type: file_type(&meta),
            size: if meta.is_dir() { 0 } else { meta.len() },
            permissions: permissions(&meta),
            modified: meta.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH),
        })
    }

    fn read_dir(&mut self) -> Result<Vec<DirEntry>, FsError> {
        if !self.stat()?.is_dir() {
            return Err(FsError::NotADirectory {
                path: self.path.clone(),
            });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(|e| FsError::io("read_dir", &self.path, e))? {
            let entry = entry.map_err(|e| FsError::io("read_dir", &self.path, e))?;
            let meta = entry
                .metadata()
                .map_err(|e| FsError::io("read_dir", entry.path(), e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                file_type: file_type(&meta),
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn file_type(meta: &fs::Metadata) -> FileType {
    if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::File
    }
}

#[cfg(unix)]
fn permissions(meta: &fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(meta.permissions().mode())
}

#[cfg(not(unix))]
fn permissions(meta: &fs::Metadata) -> Permissions {
    match (meta.is_dir(), meta.permissions().readonly()) {
        (true, true) => Permissions::readonly_dir(),
        (false, true) => Permissions::readonly_file(),
        (true, false) => Permissions::from_mode(0o755),
        (false, false) => Permissions::default_file(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>live</h1>").unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), "body {}").unwrap();
        fs::write(dir.path().join("css/print.css"), "").unwrap();
        dir
    }

    #[test]
    fn open_reads_file_contents() {
        let dir = fixture();
        let live = DirFs::new(dir.path());

        let mut file = live.open("/index.html").unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        assert_eq!(s, "<h1>live</h1>");
    }

    #[test]
    fn stat_reports_name_and_size() {
        let dir = fixture();
        let live = DirFs::new(dir.path());

        let meta = live.open("css/site.css").unwrap().stat().unwrap();
        assert_eq!(meta.name, "site.css");
        assert_eq!(meta.size, 7);
        assert!(meta.is_file());
    }

    #[test]
    fn file_handle_seeks() {
        let dir = fixture();
        let live = DirFs::new(dir.path());

        let mut file = live.open("/index.html").unwrap();
        file.seek(SeekFrom::Start(4)).unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        assert_eq!(s, "live</h1>");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = fixture();
        let live = DirFs::new(dir.path());
        let err = live.open("/missing.html").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn dot_dot_stays_inside_root() {
        let outer = tempfile::tempdir().unwrap();
        fs::write(outer.path().join("secret.txt"), "no").unwrap();
        fs::create_dir(outer.path().join("www")).unwrap();
        let live = DirFs::new(outer.path().join("www"));

        assert!(live.open("/../secret.txt").is_err());
        assert!(live.open("../../secret.txt").is_err());
    }

    #[test]
    fn nul_byte_is_rejected() {
        let live = DirFs::new("/tmp");
        let err = live.open("/a\0b").unwrap_err();
        assert!(matches!(err, FsError::InvalidPath { .. }));
    }

    #[test]
    fn root_opens_as_directory() {
        let dir = fixture();
        let live = DirFs::new(dir.path());

        let mut root = live.open("/").unwrap();
        let meta = root.stat().unwrap();
        assert!(meta.is_dir());
        assert_eq!(meta.name, "/");

        let names: Vec<String> = root.read_dir().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["css", "index.html"]);
    }

    #[test]
    fn read_dir_is_sorted_and_typed() {
        let dir = fixture();
        let live = DirFs::new(dir.path());

        let entries = live.open("/css/").unwrap().read_dir().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "print.css");
        assert_eq!(entries[1].name, "site.css");
        assert_eq!(entries[1].size, 7);
        assert!(!entries[0].is_dir());
    }

    #[test]
    fn read_dir_on_file_fails() {
        let dir = fixture();
        let live = DirFs::new(dir.path());
        let err = live.open("/index.html").unwrap().read_dir().unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn sees_files_created_after_construction() {
        let dir = fixture();
        let live = DirFs::new(dir.path());
        assert!(live.open("/late.txt").is_err());

        fs::write(dir.path().join("late.txt"), "x").unwrap();
        assert!(live.open("/late.txt").is_ok());
    }
}
