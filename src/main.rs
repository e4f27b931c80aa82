//! ytnotes CLI entry point.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytnotes::cli::{commands, Cli, Commands, ConfigAction, Output};
use ytnotes::config::Settings;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytnotes={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli).await {
        Output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Settings::default_config_path);

    // `config init` must work before the file it creates exists.
    let settings = match (&cli.command, &cli.config) {
        (Commands::Config { action: ConfigAction::Init }, _) => Settings::default(),
        (_, Some(_)) => Settings::load_from(Some(&config_path))?,
        (_, None) => Settings::load()?,
    };

    match &cli.command {
        Commands::Process { url, output_dir, model } => {
            let verbose = cli.verbose > 0;
            commands::run_process(url, output_dir.clone(), model.clone(), verbose, settings)
                .await?;
        }

        Commands::Setup => {
            commands::run_setup(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, &config_path)?;
        }
    }

    Ok(())
}
