//! CLI module for ytnotes.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytnotes - YouTube videos to structured Markdown notes
///
/// Fetches a video's transcript, summarizes it with an LLM and saves the
/// result as a Markdown note.
#[derive(Parser, Debug)]
#[command(name = "ytnotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for details and info logs, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a YouTube video and generate structured Markdown notes
    Process {
        /// YouTube video URL (youtube.com/watch?v=... or youtu.be/...)
        url: String,

        /// Output directory for Markdown files
        #[arg(short, long)]
        output_dir: Option<String>,

        /// AI model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check API keys and write an example environment file
    Setup,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (API key masked)
    Show,

    /// Write a default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process() {
        let cli = Cli::parse_from([
            "ytnotes",
            "-v",
            "process",
            "https://youtu.be/abc",
            "-o",
            "notes",
            "--model",
            "gpt-4o",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Process { url, output_dir, model } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(output_dir.as_deref(), Some("notes"));
                assert_eq!(model.as_deref(), Some("gpt-4o"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_setup_and_config() {
        assert!(matches!(Cli::parse_from(["ytnotes", "setup"]).command, Commands::Setup));
        assert!(matches!(
            Cli::parse_from(["ytnotes", "config", "path"]).command,
            Commands::Config { action: ConfigAction::Path }
        ));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
