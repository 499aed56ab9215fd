//! Where the changelog text is read from and written to.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Whole-document access to a changelog
pub trait DocumentStore {
    /// Current content, or `None` when the document does not exist yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the whole document
    fn write(&self, content: &str) -> Result<()>;
}

/// Changelog stored as a file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory store used by workflow tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        MemoryStore {
            content: RefCell::new(Some(content.into())),
            writes: RefCell::new(0),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Number of times [DocumentStore::write] was called
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> Result<()> {
        *self.content.borrow_mut() = Some(content.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("CHANGELOG.md"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("docs").join("CHANGELOG.md"));
        store.write("# Changelog\n").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("# Changelog\n"));
    }

    #[test]
    fn test_file_store_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read().is_err());
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryStore::with_content("old");
        store.write("new").unwrap();
        assert_eq!(store.content().as_deref(), Some("new"));
        assert_eq!(store.writes(), 1);
        assert_eq!(MemoryStore::new().read().unwrap(), None);
    }
}
