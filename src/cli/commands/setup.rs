//! Setup command - report API configuration and write an example environment file.

use crate::cli::Output;
use crate::config::{mask_key, Settings};
use anyhow::Result;
use std::path::{Path, PathBuf};

const ENV_EXAMPLE: &str = "# AI Provider Configuration
OPENAI_API_KEY=your_openai_api_key_here
AI_PROVIDER=openai
AI_MODEL=gpt-4o-mini

# Output Configuration
OUTPUT_DIR=output

# Processing Configuration
MAX_TRANSCRIPT_LENGTH=10000
";

/// Run the setup command in the current directory.
pub fn run_setup(settings: &Settings) -> Result<()> {
    Output::header("ytnotes Setup");
    println!();

    match settings.require_api_key() {
        Ok(key) => Output::check(true, &format!("OpenAI API key found ({})", mask_key(key))),
        Err(_) => Output::check(false, "OpenAI API key not found (set OPENAI_API_KEY)"),
    }
    if std::env::var("ANTHROPIC_API_KEY").is_ok_and(|k| !k.is_empty()) {
        Output::warning("ANTHROPIC_API_KEY is set but only the OpenAI provider is supported");
    }

    println!();
    Output::kv("AI provider", &settings.llm.provider.to_string());
    Output::kv("Model", &settings.llm.model);
    Output::kv("Output directory", &settings.output_dir().display().to_string());
    Output::kv("Config file", &Settings::default_config_path().display().to_string());
    println!();

    if let Some(path) = write_env_example(Path::new("."))? {
        Output::success(&format!(
            "Created {} - copy to .env and fill in your API keys",
            path.display()
        ));
    }

    Ok(())
}

/// Write `.env.example` into `dir` unless a `.env` file already exists there.
///
/// Returns the path written, or `None` when `.env` is present.
pub fn write_env_example(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    if dir.join(".env").exists() {
        return Ok(None);
    }
    let path = dir.join(".env.example");
    std::fs::write(&path, ENV_EXAMPLE)?;
    Ok(Some(path))
}
