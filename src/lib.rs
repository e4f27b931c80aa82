//! ytnotes - YouTube videos to structured Markdown notes
//!
//! Fetches the transcript of a YouTube video, asks an LLM for structured
//! notes and writes them as a Markdown file.
//!
//! # Architecture
//!
//! - `video` - Video id extraction and transcript models
//! - `transcript` - Transcript listing, language selection and download
//! - `generator` - Prompt construction and LLM response parsing
//! - `note` - The note model and its Markdown rendering
//! - `openai` - OpenAI chat completion client
//! - `orchestrator` - Pipeline coordination and file output
//! - `retry` - Single retry for transient network failures
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use ytnotes::config::Settings;
//! use ytnotes::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let result = orchestrator
//!         .process("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("Saved {}", result.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod note;
pub mod openai;
pub mod orchestrator;
pub mod retry;
pub mod transcript;
pub mod video;

pub use error::{NotesError, Result};
