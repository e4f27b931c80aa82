//! Pipeline orchestrator for ytnotes.
//!
//! Coordinates the process from transcript fetch to the written Markdown file.

use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::generator::{ChatModel, NoteGenerator};
use crate::note::MarkdownNote;
use crate::openai::OpenAIChat;
use crate::transcript::{TranscriptFetcher, TranscriptSource, YoutubeTranscriptSource};
use deunicode::deunicode;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{info, instrument};

/// Fallback slug for titles without any usable characters.
const EMPTY_SLUG: &str = "untitled";

/// The main orchestrator for the ytnotes pipeline.
pub struct Orchestrator {
    fetcher: TranscriptFetcher,
    generator: NoteGenerator,
    output_dir: PathBuf,
    slug_max_len: usize,
}

impl Orchestrator {
    /// Create an orchestrator with the YouTube transcript source and the OpenAI chat model.
    pub fn new(settings: &Settings) -> Result<Self> {
        let source = YoutubeTranscriptSource::new(
            Duration::from_secs(settings.transcript.timeout_secs),
            settings.transcript.languages.clone(),
        )
        .map_err(|e| crate::error::NotesError::Config(e.to_string()))?;
        let model = OpenAIChat::from_settings(&settings.llm)?;

        Self::with_components(settings, Arc::new(source), Arc::new(model))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        source: Arc<dyn TranscriptSource>,
        model: Arc<dyn ChatModel>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self {
            fetcher: TranscriptFetcher::new(source, settings.transcript.languages.clone()),
            generator: NoteGenerator::new(model, prompts, settings),
            output_dir: settings.output_dir(),
            slug_max_len: settings.output.slug_max_len,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a note and write it to `<output_dir>/<slug>.md`, replacing any existing file.
    ///
    /// The content goes to a temporary file in the same directory first, so
    /// an existing note is only replaced by a complete one.
    pub fn write_note(&self, note: &MarkdownNote) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("{}.md", slugify(note.title(), self.slug_max_len)));

        let mut file = NamedTempFile::new_in(&self.output_dir)?;
        file.write_all(note.to_markdown().as_bytes())?;
        file.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }

    /// Run the full pipeline for one video URL.
    ///
    /// Nothing is written unless every stage succeeds.
    #[instrument(skip(self))]
    pub async fn process(&self, url: &str) -> Result<ProcessResult> {
        let transcript = self.fetcher.fetch(url).await?;
        info!("Transcript fetched ({} segments)", transcript.segments().len());

        let note = self.generator.generate(&transcript).await?;

        let path = self.write_note(&note)?;
        info!("Note written to {}", path.display());

        Ok(ProcessResult {
            path,
            segments: transcript.segments().len(),
            language: transcript.video_info().language().map(str::to_string),
            note,
        })
    }
}

/// Result of processing a video.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the written Markdown file.
    pub path: PathBuf,
    /// Number of transcript segments used.
    pub segments: usize,
    /// Language code of the transcript.
    pub language: Option<String>,
    /// The generated note.
    pub note: MarkdownNote,
}

/// Turn a title into a lowercase, hyphenated, filename-safe slug of at most `max_len` characters.
///
/// Non-ASCII text is transliterated first, so titles in any script keep a
/// readable name.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for c in deunicode(title).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    let mut slug: String = slug.chars().take(max_len).collect();
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust Ownership erklärt!", 50), "rust-ownership-erklart");
        assert_eq!(slugify("  Hello,   World  ", 50), "hello-world");
        assert_eq!(slugify("Große Straße", 50), "grosse-strasse");
        assert_eq!(slugify("C++ & Rust: 2024", 50), "c-rust-2024");
        assert_eq!(slugify("???", 50), "untitled");
        assert_eq!(slugify("", 50), "untitled");
    }

    #[test]
    fn test_slugify_transliterates_other_scripts() {
        assert_eq!(slugify("Привет мир", 50), "privet-mir");
        assert_eq!(slugify("Łódź i Kraków", 50), "lodz-i-krakow");
        assert!(slugify("Ελληνικά μαθήματα", 50).starts_with("ell"));

        let japanese = slugify("東京旅行ガイド", 50);
        assert_ne!(japanese, "untitled");
        assert!(japanese
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert_ne!(slugify("Привет мир", 50), slugify("Пока мир", 50));
    }

    #[test]
    fn test_slugify_caps_length() {
        let title = "a very long title that keeps going and going well past the limit";
        let slug = slugify(title, 50);
        assert!(slug.len() <= 50);
        assert!(!slug.ends_with('-'));
        assert!(title.replace(' ', "-").starts_with(&slug));

        assert_eq!(slugify("abc def", 4), "abc");
    }
}
