use crate::error::{CramError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A record's two text fields as they appear in an editor buffer.
/// Format: first line is the primary field, a blank line, then the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub primary: String,
    pub secondary: String,
}

impl EditorContent {
    pub fn new(primary: String, secondary: String) -> Self {
        Self { primary, secondary }
    }

    /// Formats the fields for the editor buffer.
    pub fn to_buffer(&self) -> String {
        if self.secondary.is_empty() {
            format!("{}\n\n", self.primary)
        } else {
            format!("{}\n\n{}", self.primary, self.secondary)
        }
    }

    /// Parses an edited buffer: first line (trimmed) is the primary field,
    /// leading blank lines of the remainder are dropped.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines();
        let primary = lines.next().unwrap_or("").trim().to_string();

        let mut rest: Vec<&str> = lines.collect();
        while rest.first().is_some_and(|line| line.trim().is_empty()) {
            rest.remove(0);
        }

        Self {
            primary,
            secondary: rest.join("\n"),
        }
    }
}

/// Gets the editor command from the environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(editor) = env::var("VISUAL") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(CramError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| CramError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(CramError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(CramError::Io)
}

/// Opens an editor seeded with `initial` and returns the edited fields.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join("cram_edit.txt");

    fs::write(&temp_file, initial.to_buffer()).map_err(CramError::Io)?;
    let result = open_in_editor(&temp_file)?;
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result))
}
