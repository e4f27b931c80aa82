//! Configuration settings for ytnotes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub output: OutputSettings,
    pub transcript: TranscriptSettings,
    pub prompts: PromptSettings,
}

/// LLM provider type. Only OpenAI is supported.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAI),
            _ => Err(format!("Unsupported AI provider: {} (only 'openai' is supported)", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// LLM settings used by the note generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider API key. Usually supplied via OPENAI_API_KEY.
    pub api_key: Option<String>,
    /// Provider name.
    pub provider: LlmProvider,
    /// Chat model used for note generation.
    pub model: String,
    /// Sampling temperature. Kept low for reproducible notes.
    pub temperature: f32,
    /// Upper bound on completion tokens.
    pub max_output_tokens: u32,
    /// HTTP timeout for completion requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_output_tokens: 2000,
            timeout_secs: 300,
        }
    }
}

/// Where and how notes are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory for Markdown files.
    pub dir: String,
    /// Maximum length of the filename slug.
    pub slug_max_len: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            slug_max_len: 50,
        }
    }
}

/// Transcript retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Maximum number of characters of timestamped transcript sent to the LLM.
    pub max_length: usize,
    /// Preferred transcript languages, most preferred first.
    pub languages: Vec<String>,
    /// HTTP timeout for transcript requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            max_length: 10_000,
            languages: vec!["de".to_string(), "en".to_string()],
            timeout_secs: 30,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file, then apply the environment.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment variables take precedence over the file.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings: Settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else if path.is_some() {
            return Err(crate::error::NotesError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override settings from environment-style variables.
    ///
    /// `lookup` is injected so the override rules can be tested without
    /// touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> crate::error::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(provider) = non_empty("AI_PROVIDER") {
            self.llm.provider = provider
                .parse()
                .map_err(crate::error::NotesError::Config)?;
        }
        if let Some(model) = non_empty("AI_MODEL") {
            self.llm.model = model;
        }
        if let Some(dir) = non_empty("OUTPUT_DIR") {
            self.output.dir = dir;
        }
        if let Some(max) = non_empty("MAX_TRANSCRIPT_LENGTH") {
            self.transcript.max_length = max.trim().parse().map_err(|_| {
                crate::error::NotesError::Config(format!(
                    "MAX_TRANSCRIPT_LENGTH must be a positive integer, got '{}'",
                    max
                ))
            })?;
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::NotesError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytnotes")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.output.dir)
    }

    /// The API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> crate::error::Result<&str> {
        match self.llm.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(crate::error::NotesError::Config(
                "OpenAI API key not configured. Set it with: export OPENAI_API_KEY='sk-...'"
                    .to_string(),
            )),
        }
    }

    /// A copy of these settings safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.llm.api_key = copy.llm.api_key.as_deref().map(mask_key);
        copy
    }
}

/// Mask an API key for display, keeping a short prefix and suffix.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "****".to_string();
    }
    let prefix: String = chars[..7].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
