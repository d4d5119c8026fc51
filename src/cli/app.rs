//! Main app runner

use std::env;
use std::process::ExitCode;

use crate::application::ports::{ConfigStore, PlaybackState};
use crate::application::ReadAloudUseCase;
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    default_encoders, DirArtifactStore, GeminiSynthesizer, RodioPlayer, XdgConfigStore,
};

use super::args::SpeakOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run playback and exports for one passage
pub async fn run_speak(options: SpeakOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Load API key from config or environment
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters
    let synthesizer = GeminiSynthesizer::with_voice(api_key, options.model, options.voice);
    let player = RodioPlayer::new();
    let store = DirArtifactStore::new(options.output_dir);

    // Create use case
    let use_case = ReadAloudUseCase::new(synthesizer, player, store, default_encoders());
    use_case.set_passage(options.passage).await;

    let mut failed = false;

    if options.play {
        presenter.start_spinner("Synthesizing speech...");
        match use_case.play().await {
            Ok(session) => {
                presenter.spinner_success("Playing (press Ctrl-C to stop)");
                let mut watcher = session.clone();
                tokio::select! {
                    state = watcher.wait() => {
                        if state == PlaybackState::Finished {
                            presenter.success("Playback finished");
                        } else {
                            presenter.info("Playback stopped");
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        use_case.stop_playback().await;
                        session.clone().wait().await;
                        presenter.info("Playback stopped");
                    }
                }
            }
            Err(e) => {
                presenter.spinner_fail(&e.to_string());
                failed = true;
            }
        }
    }

    // Each export encodes independently; one failing format does not
    // abort the others
    for format in &options.exports {
        presenter.start_spinner(&format!("Encoding {}...", format));
        match use_case.export(*format).await {
            Ok(saved) => {
                presenter.spinner_success(&format!(
                    "Saved {} ({})",
                    saved.path.display(),
                    saved.human_readable_size()
                ));
            }
            Err(e) => {
                presenter.spinner_fail(&e.to_string());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.api_key.ok_or_else(|| {
        "Missing API key. Set GEMINI_API_KEY environment variable or run 'aloud config set api_key <key>'".to_string()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
