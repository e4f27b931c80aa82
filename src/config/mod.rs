//! Configuration module for ytnotes.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{NotePrompts, Prompts};
pub use settings::{
    mask_key, LlmProvider, LlmSettings, OutputSettings, PromptSettings, Settings,
    TranscriptSettings,
};
