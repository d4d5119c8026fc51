//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::audio::ExportFormat;
use crate::domain::passage::Passage;

/// Aloud - read text aloud and export it as audio
#[derive(Parser, Debug)]
#[command(name = "aloud")]
#[command(version)]
#[command(about = "Read text aloud and export it as WAV, MP3, or M4A using Google Gemini text-to-speech")]
#[command(long_about = None)]
pub struct Cli {
    /// Text to read aloud (falls back to --file, then stdin)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Title for the passage, used in export file names
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Read the text from a file instead of the command line
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Export the audio in the given format (repeatable)
    #[arg(short = 'e', long = "export", value_name = "FORMAT")]
    pub export: Vec<FormatArg>,

    /// Directory for exported files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Voice used for synthesis
    #[arg(long, value_name = "VOICE")]
    pub voice: Option<String>,

    /// Do not play the audio (useful together with --export)
    #[arg(long)]
    pub no_play: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Export format argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Wav,
    Mp3,
    M4a,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Wav => ExportFormat::Wav,
            FormatArg::Mp3 => ExportFormat::Mp3,
            FormatArg::M4a => ExportFormat::M4a,
        }
    }
}

impl From<ExportFormat> for FormatArg {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Wav => FormatArg::Wav,
            ExportFormat::Mp3 => FormatArg::Mp3,
            ExportFormat::M4a => FormatArg::M4a,
        }
    }
}

/// Parsed speak/export options
#[derive(Debug, Clone)]
pub struct SpeakOptions {
    pub passage: Passage,
    pub exports: Vec<ExportFormat>,
    pub output_dir: PathBuf,
    pub voice: String,
    pub model: String,
    pub play: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["api_key", "voice", "model", "output_dir"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
