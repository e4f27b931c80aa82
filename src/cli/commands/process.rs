//! Process command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the process command: transcript, note generation and file write.
pub async fn run_process(
    url: &str,
    output_dir: Option<String>,
    model: Option<String>,
    verbose: bool,
    mut settings: Settings,
) -> Result<()> {
    if let Some(dir) = output_dir {
        settings.output.dir = dir;
    }
    if let Some(model) = model {
        settings.llm.model = model;
    }

    let orchestrator = Orchestrator::new(&settings)?;

    if verbose {
        Output::info(&format!("Processing: {}", url));
        Output::kv("Output directory", &orchestrator.output_dir().display().to_string());
        Output::kv("Model", &settings.llm.model);
    }

    let spinner = Output::spinner("Fetching transcript and generating notes...");
    let result = orchestrator.process(url).await;
    spinner.finish_and_clear();
    let result = result?;

    Output::success(&format!("Generated notes saved to: {}", result.path.display()));

    if verbose {
        let note = &result.note;
        Output::kv("Title", note.title());
        Output::kv(
            "Transcript",
            &format!(
                "{} segments, language {}",
                result.segments,
                result.language.as_deref().unwrap_or("unknown")
            ),
        );
        Output::kv("TL;DR points", &note.tldr().len().to_string());
        Output::kv("Key points", &note.key_points().len().to_string());
        Output::kv("Outline items", &note.outline().len().to_string());
    }

    Ok(())
}
