//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for allar-ai
#[derive(Parser, Debug)]
#[command(name = "allar")]
#[command(author, version, about = "ALLAR AI - strategic intelligence console")]
#[command(long_about = r#"
ALLAR AI is a terminal chat console for strategic and business questions.
Replies stream in from the Gemini API as they are generated.

Configuration files are loaded from (in priority order):
1. ALLAR_* environment variables     e.g. ALLAR_GEMINI__MODEL
2. --config <path>                   Explicit config file
3. ./allar.toml                      Project-level config
4. ~/.config/allar-ai/config.toml    Global config

The API key is read from [gemini] api_key, then GEMINI_API_KEY, then API_KEY.
Without one the console runs against the offline gateway.

Example:
  allar
  allar --name "Ada Lovelace" --email ada@example.com
  allar --google --offline
  allar -m gemini-2.5-pro -vv --log-file allar.log
"#)]
pub struct Cli {
    /// Model to generate replies with (overrides [gemini] model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Never contact the provider; stream canned replies instead
    #[arg(long)]
    pub offline: bool,

    /// Sign in with this display name (requires --email)
    #[arg(long, value_name = "NAME", requires = "email")]
    pub name: Option<String>,

    /// Sign in with this contact address (requires --name)
    #[arg(long, value_name = "EMAIL", requires = "name")]
    pub email: Option<String>,

    /// Sign in with the demo Google identity
    #[arg(long, conflicts_with_all = ["name", "email"])]
    pub google: bool,

    /// Append a JSONL transcript of prompts and outcomes to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the waiting spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
