//! Error types for ytnotes.

use thiserror::Error;

/// Library-level error type for ytnotes operations.
///
/// The first five variants are the pipeline's failure kinds; each one is
/// raised by exactly one stage.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Not a recognized YouTube video URL: {0}")]
    NoVideoId(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Note generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Invalid note: {0}")]
    InvalidNote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for ytnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;
