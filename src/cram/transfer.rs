//! Bulk transfer: whole-collection export to and import from JSON files.
//!
//! Export writes the records exactly as stored, pretty-printed. Import
//! checks only the envelope—valid JSON, top-level array—and coerces the
//! elements leniently, missing fields defaulting. That trust boundary is
//! deliberate: an exported file should always come back, even hand-edited,
//! even from an older version. Content validation happens when a record is
//! next saved, not here.

use crate::error::{CramError, ImportError, Result};
use crate::model::Record;
use std::fs;
use std::path::Path;

/// Default export filename for a domain, e.g. `notes_export.json`.
pub fn default_export_filename<R: Record>() -> String {
    format!("{}_export.json", R::STORAGE_KEY)
}

/// Serializes a collection as pretty-printed JSON (2-space indentation).
pub fn export_json<R: Record>(records: &[R]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(CramError::Serialization)
}

pub fn export_to_file<R: Record>(records: &[R], path: &Path) -> Result<()> {
    fs::write(path, export_json(records)?).map_err(CramError::Io)
}

/// Parses an exported payload back into records.
///
/// Fails with [`ImportError::Malformed`] when the bytes are not JSON and
/// [`ImportError::NotAnArray`] when the top level is not an array. On
/// success the caller is expected to feed the result to
/// [`crate::collection::Collection::replace_all`].
pub fn import_json<R: Record>(bytes: &[u8]) -> std::result::Result<Vec<R>, ImportError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(ImportError::Malformed)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    serde_json::from_value(value).map_err(ImportError::Malformed)
}

pub fn import_from_file<R: Record>(path: &Path) -> Result<Vec<R>> {
    let bytes = fs::read(path).map_err(CramError::Io)?;
    Ok(import_json(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flashcard, Note};

    fn sample_notes() -> Vec<Note> {
        vec![
            Note {
                id: "a1".into(),
                title: "Zebra".into(),
                content: "stripes".into(),
                tags: vec!["animals".into()],
                pinned: false,
            },
            Note {
                id: "b2".into(),
                title: "Apple".into(),
                content: String::new(),
                tags: vec![],
                pinned: true,
            },
        ]
    }

    #[test]
    fn import_of_export_is_identity() {
        let notes = sample_notes();
        let exported = export_json(&notes).unwrap();
        let imported: Vec<Note> = import_json(exported.as_bytes()).unwrap();
        assert_eq!(imported, notes);
    }

    #[test]
    fn export_is_pretty_printed() {
        let exported = export_json(&sample_notes()).unwrap();
        assert!(exported.starts_with("[\n  {"));
        assert!(exported.contains("\n    \"id\": \"a1\""));
    }

    #[test]
    fn non_array_json_is_rejected() {
        let err = import_json::<Note>(b"{}").unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray));
    }

    #[test]
    fn garbage_is_rejected_as_malformed() {
        let err = import_json::<Note>(b"not json").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
    }

    #[test]
    fn sparse_elements_are_accepted_with_defaults() {
        let imported: Vec<Flashcard> =
            import_json(br#"[{"question": "Only a question"}, {}]"#).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].question, "Only a question");
        assert_eq!(imported[0].answer, "");
        assert_eq!(imported[1].question, "");
        assert!(!imported[1].pinned);
    }

    #[test]
    fn file_roundtrip_through_the_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_export_filename::<Note>());
        assert_eq!(path.file_name().unwrap(), "notes_export.json");

        let notes = sample_notes();
        export_to_file(&notes, &path).unwrap();
        let imported: Vec<Note> = import_from_file(&path).unwrap();
        assert_eq!(imported, notes);
    }

    #[test]
    fn missing_file_surfaces_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_from_file::<Note>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CramError::Io(_)));
    }
}
