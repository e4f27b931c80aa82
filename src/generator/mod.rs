//! Note generation: transcript in, validated [`MarkdownNote`] out.

mod parse;

pub use parse::{find_json_object, parse_note};

use crate::config::{Prompts, Settings};
use crate::error::{NotesError, Result};
use crate::note::MarkdownNote;
use crate::video::VideoTranscript;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A single chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Trait for chat completion providers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Return the model's reply text. Transport and API failures are `GenerationFailed`.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Builds prompts from a transcript, calls the model and parses its reply.
pub struct NoteGenerator {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
    max_transcript_length: usize,
    temperature: f32,
    max_output_tokens: u32,
}

impl NoteGenerator {
    pub fn new(model: Arc<dyn ChatModel>, prompts: Prompts, settings: &Settings) -> Self {
        Self {
            model,
            prompts,
            max_transcript_length: settings.transcript.max_length,
            temperature: settings.llm.temperature,
            max_output_tokens: settings.llm.max_output_tokens,
        }
    }

    /// Build the system and user prompts for a transcript.
    pub fn build_request(&self, transcript: &VideoTranscript) -> ChatRequest {
        let text = truncate_chars(&transcript.timestamped_text(), self.max_transcript_length);
        let info = transcript.video_info();

        let mut vars = HashMap::new();
        vars.insert("url".to_string(), info.url().to_string());
        vars.insert(
            "title".to_string(),
            info.title().unwrap_or("unbekannt").to_string(),
        );
        vars.insert("transcript".to_string(), text);

        ChatRequest {
            system: self
                .prompts
                .render_with_custom(&self.prompts.notes.system, &vars),
            user: self.prompts.render_with_custom(&self.prompts.notes.user, &vars),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    /// Generate a note for a transcript.
    #[instrument(skip(self, transcript), fields(url = %transcript.video_info().url()))]
    pub async fn generate(&self, transcript: &VideoTranscript) -> Result<MarkdownNote> {
        let request = self.build_request(transcript);
        debug!(
            "Prompt sizes: system {} chars, user {} chars",
            request.system.chars().count(),
            request.user.chars().count()
        );

        let reply = self.model.complete(&request).await?;
        if reply.trim().is_empty() {
            return Err(NotesError::GenerationFailed(
                "model returned empty content".to_string(),
            ));
        }

        let note = parse_note(&reply, transcript.video_info().url().as_str()).inspect_err(|e| {
            debug!("Rejected model reply ({}): {}", e, reply);
        })?;
        info!("Generated note '{}'", note.title());
        Ok(note)
    }
}

/// Truncate to at most `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
