//! # Storage Layer
//!
//! The durable side of every collection. [`StorageBackend`] is a key-value
//! seam: whole collections are stored as one JSON array per key, overwritten
//! in full on every write. There is no partial or incremental update.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production storage, one `<key>.json` file per key
//!   under the data directory
//! - [`memory::MemoryBackend`]: in-memory storage for testing, no
//!   persistence
//!
//! ## Read tolerance
//!
//! Reads fail soft. A missing key, truncated JSON, or a non-array payload
//! all come back as an empty collection—a corrupt store must never stop the
//! app from loading. Writes, in contrast, propagate their errors: a mutation
//! is only considered durable once [`save_records`] returns Ok.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

/// Abstract key-value storage.
pub trait StorageBackend {
    /// Raw payload stored at `key`, or None when the key was never written.
    fn read(&self, key: &str) -> Option<String>;

    /// Overwrites `key` with `payload`. Durable once this returns.
    fn write(&mut self, key: &str, payload: &str) -> Result<()>;
}

/// Reads a whole collection from `key`, decoding anything unusable as empty.
pub fn load_records<R, B>(backend: &B, key: &str) -> Vec<R>
where
    R: DeserializeOwned,
    B: StorageBackend,
{
    match backend.read(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Writes a whole collection to `key`, replacing prior contents.
pub fn save_records<R, B>(backend: &mut B, key: &str, records: &[R]) -> Result<()>
where
    R: Serialize,
    B: StorageBackend,
{
    let payload = serde_json::to_string(records)?;
    backend.write(key, &payload)
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryBackend;
    use super::*;
    use crate::model::Note;

    #[test]
    fn missing_key_loads_empty() {
        let backend = MemoryBackend::new();
        let records: Vec<Note> = load_records(&backend, "notes");
        assert!(records.is_empty());
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        let mut backend = MemoryBackend::new();
        backend.write("notes", "{not json").unwrap();
        let records: Vec<Note> = load_records(&backend, "notes");
        assert!(records.is_empty());
    }

    #[test]
    fn non_array_payload_loads_empty() {
        let mut backend = MemoryBackend::new();
        backend.write("notes", "{\"id\":\"a\"}").unwrap();
        let records: Vec<Note> = load_records(&backend, "notes");
        assert!(records.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut backend = MemoryBackend::new();
        let notes = vec![Note {
            id: "a".into(),
            title: "One".into(),
            content: String::new(),
            tags: vec![],
            pinned: false,
        }];
        save_records(&mut backend, "notes", &notes).unwrap();
        let loaded: Vec<Note> = load_records(&backend, "notes");
        assert_eq!(loaded, notes);
    }
}
