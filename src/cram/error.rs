use thiserror::Error;

#[derive(Error, Debug)]
pub enum CramError {
    #[error("{0} is required")]
    Validation(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Editor error: {0}")]
    Editor(String),
}

/// Rejection reasons for an imported payload. Anything past these two checks
/// is accepted; see [`crate::transfer::import_json`].
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to parse JSON")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid JSON file: expected a top-level array")]
    NotAnArray,
}

pub type Result<T> = std::result::Result<T, CramError>;
