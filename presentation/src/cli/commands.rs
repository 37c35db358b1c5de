//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Stream the answer as it arrives
    Text,
    /// Print one JSON snapshot when the session ends
    Json,
}

impl From<OutputFormatArg> for querydash_domain::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => querydash_domain::OutputFormat::Text,
            OutputFormatArg::Json => querydash_domain::OutputFormat::Json,
        }
    }
}

/// Text generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// OpenAI-compatible HTTP endpoint
    Openai,
    /// Offline playback, no network
    Scripted,
}

impl ProviderArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderArg::Openai => "openai",
            ProviderArg::Scripted => "scripted",
        }
    }
}

/// CLI arguments for querydash
#[derive(Parser, Debug)]
#[command(name = "querydash")]
#[command(author, version, about = "Ask a text generation service and watch the answer stream in")]
#[command(long_about = r#"
querydash sends a prompt to a text generation service and prints the answer
as it streams in. Submitting a new prompt (or pressing Ctrl-C) cancels the
one in flight.

Configuration is merged from (lowest to highest priority):
1. built-in defaults
2. ~/.config/querydash/config.toml    Global config
3. ./querydash.toml                   Project-level config
4. --config <path>                    Explicit config file
5. QUERYDASH_* environment variables  e.g. QUERYDASH_SESSION__MODEL
6. command line flags

Example:
  querydash "Explain ownership in one paragraph"
  querydash --single-shot --output json "Hello?"
  querydash --chat --provider scripted
  querydash --dashboard
"#)]
pub struct Cli {
    /// The prompt to send (not required in chat or dashboard mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "dashboard")]
    pub chat: bool,

    /// Show the dashboard and exit
    #[arg(long)]
    pub dashboard: bool,

    /// Model to request
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Ask for one complete response instead of a stream
    #[arg(long)]
    pub single_shot: bool,

    /// Text generation backend
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Seconds to wait for the response or the next fragment (0 disables)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
