//! CLI entrypoint for ALLAR AI
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use allar_application::{ChatWorkspace, GenerationController, SharedSessionStore};
use allar_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ProviderKind, select_gateway,
};
use allar_presentation::{ChatRepl, Cli, ConsoleConfig, ConsoleFormatter};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held for the whole run so buffered log lines reach the file
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting ALLAR AI");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    if !config.console.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let (gateway, provider) = select_gateway(&config, cli.offline)?;
    if provider == ProviderKind::Offline && !cli.offline {
        println!(
            "{}",
            ConsoleFormatter::notice(
                "No Gemini API key found (GEMINI_API_KEY); running with the offline engine"
            )
        );
    }
    info!("Using {} provider with model {}", provider, gateway.model());

    let mut controller = GenerationController::new(gateway, SharedSessionStore::new());
    if let Some(path) = config.logging.transcript.as_deref() {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Transcript: {}", logger.path().display());
                controller = controller.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Transcript disabled: could not open {}", path),
        }
    }

    let mut workspace = ChatWorkspace::new(controller);
    if cli.google {
        workspace.sign_in_with_google();
    } else if let (Some(name), Some(email)) = (cli.name.as_deref(), cli.email.as_deref()) {
        workspace.sign_in(name, email)?;
    }

    let console = ConsoleConfig {
        color: config.console.color,
        show_spinner: config.console.show_spinner,
        history_file: config.console.history_file.clone(),
    };

    let mut repl = ChatRepl::new(workspace, console);
    repl.run().await?;

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Merge configuration sources, apply CLI overrides and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.gemini.model = model.clone();
    }
    if let Some(path) = &cli.transcript {
        config.logging.transcript = Some(path.display().to_string());
    }
    if cli.no_color {
        config.console.color = false;
    }
    if cli.quiet {
        config.console.show_spinner = false;
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let list = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", list);
    }

    Ok(config)
}
