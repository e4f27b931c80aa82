//! The structured note produced for a video.

pub mod markdown;

use crate::error::{NotesError, Result};
use chrono::{DateTime, Local};

/// Allowed number of TL;DR points.
pub const TLDR_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

/// A quote with its position in the video.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub text: String,
    /// Formatted as `MM:SS`; not validated.
    pub timestamp: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Body of an additional note section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// Rendered as a bullet list.
    Items(Vec<String>),
    /// Rendered verbatim.
    Text(String),
}

/// A validated note. Construction checks the section cardinalities;
/// after that the note is read-only.
#[derive(Debug, Clone)]
pub struct MarkdownNote {
    title: String,
    source_url: String,
    tldr: Vec<String>,
    key_points: Vec<String>,
    outline: Vec<String>,
    quotes: Vec<Quote>,
    additional_sections: Vec<(String, SectionContent)>,
    generated_at: DateTime<Local>,
}

impl MarkdownNote {
    /// Create a note, rejecting it unless it has 3-5 TL;DR points,
    /// at least one key point and at least one outline item.
    pub fn new(
        title: impl Into<String>,
        source_url: impl Into<String>,
        tldr: Vec<String>,
        key_points: Vec<String>,
        outline: Vec<String>,
    ) -> Result<Self> {
        if !TLDR_RANGE.contains(&tldr.len()) {
            return Err(NotesError::InvalidNote(format!(
                "expected {}-{} TL;DR points, got {}",
                TLDR_RANGE.start(),
                TLDR_RANGE.end(),
                tldr.len()
            )));
        }
        if key_points.is_empty() {
            return Err(NotesError::InvalidNote(
                "expected at least one key point".to_string(),
            ));
        }
        if outline.is_empty() {
            return Err(NotesError::InvalidNote(
                "expected at least one outline item".to_string(),
            ));
        }

        Ok(Self {
            title: title.into(),
            source_url: source_url.into(),
            tldr,
            key_points,
            outline,
            quotes: Vec::new(),
            additional_sections: Vec::new(),
            generated_at: Local::now(),
        })
    }

    pub fn with_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.quotes = quotes;
        self
    }

    /// Attach extra sections, rendered in the given order.
    pub fn with_sections(mut self, sections: Vec<(String, SectionContent)>) -> Self {
        self.additional_sections = sections;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn tldr(&self) -> &[String] {
        &self.tldr
    }

    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }

    pub fn outline(&self) -> &[String] {
        &self.outline
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn additional_sections(&self) -> &[(String, SectionContent)] {
        &self.additional_sections
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    /// Render the note as Markdown.
    pub fn to_markdown(&self) -> String {
        markdown::render(self)
    }
}
