use super::StorageBackend;
use crate::error::{CramError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed storage: one JSON document per key under a data directory.
/// The directory is created on first write, not on open, so read-only use
/// of an empty store touches nothing on disk.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CramError::Io)?;
        }
        fs::write(self.key_path(key), payload).map_err(CramError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());
        backend.write("notes", "[1,2,3]").unwrap();
        assert_eq!(backend.read("notes").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn unwritten_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.read("flashcards"), None);
    }

    #[test]
    fn keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path());
        backend.write("notes", "[]").unwrap();
        backend.write("flashcards", "[]").unwrap();
        assert!(dir.path().join("notes.json").exists());
        assert!(dir.path().join("flashcards.json").exists());
    }

    #[test]
    fn creates_missing_directories_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut backend = FileBackend::new(&nested);
        backend.write("notes", "[]").unwrap();
        assert!(nested.join("notes.json").exists());
    }
}
