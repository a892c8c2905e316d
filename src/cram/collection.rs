//! The collection store.
//!
//! A [`Collection`] owns the canonical in-memory records for one domain and
//! keeps its storage key in lockstep: every mutation writes the whole
//! collection back through the backend before returning. There is no
//! eventual-consistency window—when a mutation returns Ok, memory and
//! storage agree.
//!
//! Mutations targeting an id that is no longer present (a stale reference)
//! are silent no-ops, reported through the return value rather than an
//! error. The one validation rule—the primary text field must not be empty
//! after trimming—applies on save, not at rest: imported records are
//! accepted as-is.

use crate::error::{CramError, Result};
use crate::ident;
use crate::model::{Draft, Record};
use crate::store::{load_records, save_records, StorageBackend};

/// A pending edit: the draft plus the record it will replace, if any.
/// At most one exists per collection; opening another replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSession {
    target: Option<String>,
    pub draft: Draft,
}

impl DraftSession {
    /// Id of the record being edited, or None when composing a new one.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.target.is_none()
    }
}

type Watcher<R> = Box<dyn FnMut(&[R])>;

pub struct Collection<R: Record, B: StorageBackend> {
    backend: B,
    records: Vec<R>,
    scratch: Option<DraftSession>,
    watcher: Option<Watcher<R>>,
}

impl<R: Record, B: StorageBackend> Collection<R, B> {
    /// Loads whatever is persisted under `R::STORAGE_KEY`. A missing or
    /// unreadable payload yields an empty collection, never an error.
    pub fn open(backend: B) -> Self {
        let records = load_records(&backend, R::STORAGE_KEY);
        Self {
            backend,
            records,
            scratch: None,
            watcher: None,
        }
    }

    /// Records in stored (insertion) order. Display order is derived by
    /// [`crate::view::project`], never persisted.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn pinned_count(&self) -> usize {
        self.records.iter().filter(|r| r.pinned()).count()
    }

    /// Registers a callback fired after every persisted mutation, with the
    /// new records. This is the "collection changed" signal a UI re-renders
    /// from.
    pub fn set_watcher(&mut self, watcher: impl FnMut(&[R]) + 'static) {
        self.watcher = Some(Box::new(watcher));
    }

    fn persist(&mut self) -> Result<()> {
        save_records(&mut self.backend, R::STORAGE_KEY, &self.records)?;
        if let Some(watcher) = self.watcher.as_mut() {
            watcher(&self.records);
        }
        Ok(())
    }

    /// Validates and appends a new record, returning its id. An empty
    /// primary field fails without touching memory or storage.
    pub fn create(&mut self, draft: Draft) -> Result<String> {
        if draft.primary.trim().is_empty() {
            return Err(CramError::Validation(R::PRIMARY_LABEL));
        }
        let id = ident::next_id();
        self.records.push(R::from_draft(id.clone(), draft));
        self.persist()?;
        Ok(id)
    }

    /// Replaces every mutable field of the record with `id`, keeping the id.
    /// Returns false, touching nothing, when the id is no longer present.
    pub fn update(&mut self, id: &str, draft: Draft) -> Result<bool> {
        if draft.primary.trim().is_empty() {
            return Err(CramError::Validation(R::PRIMARY_LABEL));
        }
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        record.apply_draft(draft);
        self.persist()?;
        Ok(true)
    }

    /// Removes the record with `id`. Returns false for an absent id.
    /// Asking the user first is the caller's job.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Flips the pin flag and returns the new state, or None for a stale id.
    pub fn toggle_pin(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let pinned = !record.pinned();
        record.set_pinned(pinned);
        self.persist()?;
        Ok(Some(pinned))
    }

    /// Wholesale replacement, the import entry point. Incoming records are
    /// trusted structurally and not validated individually.
    pub fn replace_all(&mut self, records: Vec<R>) -> Result<()> {
        self.records = records;
        self.persist()
    }

    // --- pending edit ----------------------------------------------------

    /// Starts a draft. `Some(id)` loads an existing record's fields (false
    /// when the id is gone, leaving any current draft alone); `None` opens a
    /// blank draft. A draft already in progress is replaced, no questions
    /// asked.
    pub fn open_draft(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) => match self.get(id) {
                Some(record) => {
                    self.scratch = Some(DraftSession {
                        target: Some(id.to_string()),
                        draft: record.to_draft(),
                    });
                    true
                }
                None => false,
            },
            None => {
                self.scratch = Some(DraftSession {
                    target: None,
                    draft: Draft::default(),
                });
                true
            }
        }
    }

    pub fn draft(&self) -> Option<&DraftSession> {
        self.scratch.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut DraftSession> {
        self.scratch.as_mut()
    }

    /// Commits the draft through [`create`](Self::create) or
    /// [`update`](Self::update) and returns the saved record's id. On a
    /// validation error the draft survives so the caller can correct it;
    /// any other outcome consumes it. None means the target disappeared or
    /// no draft was open.
    pub fn save_draft(&mut self) -> Result<Option<String>> {
        let Some(session) = self.scratch.take() else {
            return Ok(None);
        };
        let outcome = match session.target.as_deref() {
            None => self.create(session.draft.clone()).map(Some),
            Some(id) => self
                .update(id, session.draft.clone())
                .map(|found| found.then(|| id.to_string())),
        };
        if matches!(outcome, Err(CramError::Validation(_))) {
            self.scratch = Some(session);
        }
        outcome
    }

    pub fn discard_draft(&mut self) {
        self.scratch = None;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Note;
    use crate::store::memory::MemoryBackend;

    pub fn note_draft(title: &str, content: &str) -> Draft {
        Draft {
            primary: title.to_string(),
            secondary: content.to_string(),
            tags: Vec::new(),
            pinned: false,
        }
    }

    pub fn pinned_draft(title: &str) -> Draft {
        Draft {
            primary: title.to_string(),
            pinned: true,
            ..Draft::default()
        }
    }

    pub fn note_collection(titles: &[&str]) -> Collection<Note, MemoryBackend> {
        let mut collection = Collection::open(MemoryBackend::new());
        for title in titles {
            collection.create(note_draft(title, "")).unwrap();
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{self, note_draft, pinned_draft};
    use super::*;
    use crate::error::CramError;
    use crate::model::Note;
    use crate::store::memory::MemoryBackend;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Backend double that counts writes, to prove failed validation never
    /// reaches storage.
    #[derive(Default)]
    struct CountingBackend {
        inner: MemoryBackend,
        writes: usize,
    }

    impl StorageBackend for CountingBackend {
        fn read(&self, key: &str) -> Option<String> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, payload: &str) -> Result<()> {
            self.writes += 1;
            self.inner.write(key, payload)
        }
    }

    fn stored_notes(collection: &Collection<Note, MemoryBackend>) -> Vec<Note> {
        load_records(&collection.backend, Note::STORAGE_KEY)
    }

    #[test]
    fn every_mutation_leaves_storage_equal_to_memory() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());

        let a = c.create(note_draft("Alpha", "first")).unwrap();
        assert_eq!(stored_notes(&c), c.records);

        let b = c.create(pinned_draft("Beta")).unwrap();
        assert_eq!(stored_notes(&c), c.records);

        c.update(&a, note_draft("Alpha II", "revised")).unwrap();
        assert_eq!(stored_notes(&c), c.records);

        c.toggle_pin(&b).unwrap();
        assert_eq!(stored_notes(&c), c.records);

        c.delete(&a).unwrap();
        assert_eq!(stored_notes(&c), c.records);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn open_restores_what_was_persisted() {
        let mut first: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        first.create(note_draft("Kept", "body")).unwrap();
        let backend = first.backend;

        let second: Collection<Note, MemoryBackend> = Collection::open(backend);
        assert_eq!(second.len(), 1);
        assert_eq!(second.records()[0].title, "Kept");
    }

    #[test]
    fn create_with_blank_title_touches_nothing() {
        let mut c: Collection<Note, CountingBackend> =
            Collection::open(CountingBackend::default());

        let err = c.create(note_draft("   ", "body")).unwrap_err();
        assert!(matches!(err, CramError::Validation("Title")));
        assert!(c.is_empty());
        assert_eq!(c.backend.writes, 0);
    }

    #[test]
    fn update_of_missing_id_is_a_silent_noop() {
        let mut c: Collection<Note, CountingBackend> =
            Collection::open(CountingBackend::default());
        c.create(note_draft("Only", "")).unwrap();
        let writes = c.backend.writes;

        assert!(!c.update("nope", note_draft("X", "")).unwrap());
        assert_eq!(c.backend.writes, writes);
        assert_eq!(c.records()[0].title, "Only");
    }

    #[test]
    fn delete_of_missing_id_changes_nothing() {
        let mut c = fixtures::note_collection(&["One", "Two"]);
        assert!(!c.delete("ghost").unwrap());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn update_preserves_id_and_replaces_fields() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        let id = c.create(note_draft("Before", "old")).unwrap();

        let mut draft = note_draft("After", "new");
        draft.tags = vec!["work".to_string()];
        draft.pinned = true;
        assert!(c.update(&id, draft).unwrap());

        let record = c.get(&id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.title, "After");
        assert_eq!(record.content, "new");
        assert_eq!(record.tags, vec!["work".to_string()]);
        assert!(record.pinned);
    }

    #[test]
    fn toggle_pin_flips_and_reports_state() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        let id = c.create(note_draft("N", "")).unwrap();

        assert_eq!(c.toggle_pin(&id).unwrap(), Some(true));
        assert_eq!(c.toggle_pin(&id).unwrap(), Some(false));
        assert_eq!(c.toggle_pin("ghost").unwrap(), None);
    }

    #[test]
    fn replace_all_swaps_the_collection_wholesale() {
        let mut c = fixtures::note_collection(&["Old"]);
        let incoming = vec![Note {
            id: "imported".into(),
            title: String::new(), // no validation on import
            content: String::new(),
            tags: vec![],
            pinned: false,
        }];
        c.replace_all(incoming.clone()).unwrap();
        assert_eq!(c.records(), incoming.as_slice());
        assert_eq!(stored_notes(&c), incoming);
    }

    #[test]
    fn watcher_fires_after_each_persisted_mutation() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        let counter = Rc::new(Cell::new(0usize));
        let hits = Rc::clone(&counter);
        c.set_watcher(move |_records: &[Note]| hits.set(hits.get() + 1));

        let id = c.create(note_draft("A", "")).unwrap();
        c.toggle_pin(&id).unwrap();
        c.delete(&id).unwrap();
        assert_eq!(counter.get(), 3);

        // failed validation never notifies
        assert!(c.create(note_draft("", "")).is_err());
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn opening_a_second_draft_replaces_the_first() {
        let mut c = fixtures::note_collection(&["One", "Two"]);
        let first_id = c.records()[0].id.clone();
        let second_id = c.records()[1].id.clone();

        assert!(c.open_draft(Some(&first_id)));
        assert!(c.open_draft(Some(&second_id)));

        let session = c.draft().unwrap();
        assert_eq!(session.target(), Some(second_id.as_str()));
        assert_eq!(session.draft.primary, "Two");
    }

    #[test]
    fn open_draft_for_missing_id_reports_false() {
        let mut c = fixtures::note_collection(&["One"]);
        assert!(!c.open_draft(Some("ghost")));
        assert!(c.draft().is_none());
    }

    #[test]
    fn save_draft_creates_then_clears() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        c.open_draft(None);
        assert!(c.draft().unwrap().is_new());
        c.draft_mut().unwrap().draft.primary = "Fresh".into();

        let id = c.save_draft().unwrap().unwrap();
        assert!(c.draft().is_none());
        assert_eq!(c.get(&id).unwrap().title, "Fresh");
    }

    #[test]
    fn invalid_draft_survives_a_failed_save() {
        let mut c: Collection<Note, MemoryBackend> = Collection::open(MemoryBackend::new());
        c.open_draft(None);
        c.draft_mut().unwrap().draft.secondary = "body without a title".into();

        assert!(c.save_draft().is_err());
        let session = c.draft().expect("draft should stay open");
        assert_eq!(session.draft.secondary, "body without a title");
    }

    #[test]
    fn save_draft_for_vanished_target_is_none() {
        let mut c = fixtures::note_collection(&["Doomed"]);
        let id = c.records()[0].id.clone();
        c.open_draft(Some(&id));
        c.draft_mut().unwrap().draft.primary = "Edited".into();
        c.delete(&id).unwrap();

        assert_eq!(c.save_draft().unwrap(), None);
        assert!(c.draft().is_none());
    }
}
