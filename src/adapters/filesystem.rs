//! Local disk implementation of [`FileSystem`]

use super::traits::FileSystem;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a new local file system handle
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn modified(&self, path: &Path) -> io::Result<DateTime<Utc>> {
        Ok(DateTime::<Utc>::from(fs::metadata(path)?.modified()?))
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => fs::create_dir_all(path),
            Err(e) => Err(e),
        }
    }
}
