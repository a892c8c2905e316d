use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Scratch fields for a record being composed or edited. No id: a draft
/// either becomes a new record or is applied onto an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub primary: String,
    pub secondary: String,
    pub tags: Vec<String>,
    pub pinned: bool,
}

/// The seam the generic pipeline is built over. Notes and flashcards share
/// everything except their field names, so the collection store, projector,
/// and transfer code only ever see this trait.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Key the collection persists under.
    const STORAGE_KEY: &'static str;
    /// Noun used in user-facing messages ("note", "flashcard").
    const KIND: &'static str;
    /// Label of the required text field, for validation messages.
    const PRIMARY_LABEL: &'static str;
    const SECONDARY_LABEL: &'static str;

    fn id(&self) -> &str;
    fn pinned(&self) -> bool;
    fn set_pinned(&mut self, pinned: bool);
    fn primary(&self) -> &str;
    fn secondary(&self) -> &str;
    fn tags(&self) -> &[String];

    fn from_draft(id: String, draft: Draft) -> Self;
    fn to_draft(&self) -> Draft;
    /// Replaces every mutable field. The id stays.
    fn apply_draft(&mut self, draft: Draft);
}

// Every field defaults so that structurally poor data (hand-edited exports,
// old payloads) still loads instead of crashing the whole collection.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

impl Record for Note {
    const STORAGE_KEY: &'static str = "notes";
    const KIND: &'static str = "note";
    const PRIMARY_LABEL: &'static str = "Title";
    const SECONDARY_LABEL: &'static str = "Content";

    fn id(&self) -> &str {
        &self.id
    }

    fn pinned(&self) -> bool {
        self.pinned
    }

    fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    fn primary(&self) -> &str {
        &self.title
    }

    fn secondary(&self) -> &str {
        &self.content
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn from_draft(id: String, draft: Draft) -> Self {
        Self {
            id,
            title: draft.primary,
            content: draft.secondary,
            tags: draft.tags,
            pinned: draft.pinned,
        }
    }

    fn to_draft(&self) -> Draft {
        Draft {
            primary: self.title.clone(),
            secondary: self.content.clone(),
            tags: self.tags.clone(),
            pinned: self.pinned,
        }
    }

    fn apply_draft(&mut self, draft: Draft) {
        self.title = draft.primary;
        self.content = draft.secondary;
        self.tags = draft.tags;
        self.pinned = draft.pinned;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

impl Record for Flashcard {
    const STORAGE_KEY: &'static str = "flashcards";
    const KIND: &'static str = "flashcard";
    const PRIMARY_LABEL: &'static str = "Question";
    const SECONDARY_LABEL: &'static str = "Answer";

    fn id(&self) -> &str {
        &self.id
    }

    fn pinned(&self) -> bool {
        self.pinned
    }

    fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    fn primary(&self) -> &str {
        &self.question
    }

    fn secondary(&self) -> &str {
        &self.answer
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn from_draft(id: String, draft: Draft) -> Self {
        Self {
            id,
            question: draft.primary,
            answer: draft.secondary,
            tags: draft.tags,
            pinned: draft.pinned,
        }
    }

    fn to_draft(&self) -> Draft {
        Draft {
            primary: self.question.clone(),
            secondary: self.answer.clone(),
            tags: self.tags.clone(),
            pinned: self.pinned,
        }
    }

    fn apply_draft(&mut self, draft: Draft) {
        self.question = draft.primary;
        self.answer = draft.secondary;
        self.tags = draft.tags;
        self.pinned = draft.pinned;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_to_the_stored_shape() {
        let note = Note {
            id: "abc123".into(),
            title: "Groceries".into(),
            content: "milk\neggs".into(),
            tags: vec!["home".into()],
            pinned: true,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc123",
                "title": "Groceries",
                "content": "milk\neggs",
                "tags": ["home"],
                "pinned": true
            })
        );
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let note: Note = serde_json::from_str("{}").unwrap();
        assert_eq!(note.id, "");
        assert_eq!(note.title, "");
        assert!(note.tags.is_empty());
        assert!(!note.pinned);
    }

    #[test]
    fn draft_roundtrip_preserves_fields() {
        let card = Flashcard {
            id: "x1".into(),
            question: "Capital of France?".into(),
            answer: "Paris".into(),
            tags: vec!["geo".into()],
            pinned: false,
        };
        let rebuilt = Flashcard::from_draft("x1".into(), card.to_draft());
        assert_eq!(rebuilt, card);
    }

    #[test]
    fn apply_draft_keeps_the_id() {
        let mut note = Note::from_draft(
            "keep-me".into(),
            Draft {
                primary: "Old".into(),
                ..Draft::default()
            },
        );
        note.apply_draft(Draft {
            primary: "New".into(),
            secondary: "body".into(),
            tags: vec!["t".into()],
            pinned: true,
        });
        assert_eq!(note.id, "keep-me");
        assert_eq!(note.title, "New");
        assert!(note.pinned);
    }
}
