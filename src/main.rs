//! Aloud CLI entry point

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use aloud::cli::{
    app::{load_merged_config, run_speak, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, SpeakOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use aloud::domain::config::AppConfig;
use aloud::domain::passage::Passage;
use aloud::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Resolve the text to vocalize: argument, file, or stdin
    let body = match read_body(&cli).await {
        Ok(body) => body,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if body.trim().is_empty() {
        presenter.error("No text to read. Pass TEXT, use --file, or pipe text on stdin.");
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        voice: cli.voice.clone(),
        model: None,
        output_dir: cli
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = SpeakOptions {
        passage: Passage::new(cli.title.unwrap_or_default(), body),
        exports: cli.export.into_iter().map(Into::into).collect(),
        output_dir: PathBuf::from(config.output_dir_or_default()),
        voice: config.voice_or_default().to_string(),
        model: config.model_or_default().to_string(),
        play: !cli.no_play,
    };

    run_speak(options).await
}

/// Read the passage body from the argument, a file, or stdin
async fn read_body(cli: &Cli) -> Result<String, String> {
    if let Some(text) = cli.text.clone() {
        return Ok(text);
    }

    if let Some(path) = cli.file.as_ref() {
        return tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e));
    }

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(body)
}
