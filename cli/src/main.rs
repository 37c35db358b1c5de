//! CLI entrypoint for querydash
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use querydash_application::{
    ConversationLogger, QueryController, SessionObserver, StreamQueryUseCase,
};
use querydash_domain::{SessionStatus, Severity};
use querydash_infrastructure::{
    build_generator, ConfigLoader, FileConfig, JsonlConversationLogger, PlaceholderData,
};
use querydash_presentation::{
    ChatRepl, Cli, ConsoleFormatter, DashboardView, OutputConfig, SpinnerOnly, StreamPrinter,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Exit status of a query interrupted with Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keeps the log file writer alive until exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting querydash");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("Error: {}", issue.message),
            Severity::Warning => eprintln!("Warning: {}", issue.message),
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }

    let output = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
        show_progress: !cli.quiet,
    };
    output.apply_color();

    // Dashboard mode needs no text generation service
    if cli.dashboard {
        let data = PlaceholderData::load();
        let view = DashboardView::build(&data.customers, &data.invoices, &data.revenue);
        if output.is_json() {
            println!("{}", view.render_json());
        } else {
            print!("{}", view.render_text());
        }
        return Ok(ExitCode::SUCCESS);
    }

    // === Dependency Injection ===
    let (kind, _) = config.provider.parse_kind();
    let generator = build_generator(
        kind,
        &config.provider,
        config.session.effective_channel_capacity(),
    )?;
    let (params, _) = config.session.to_session_params();
    info!(
        "Model: {}, mode: {}, timeout: {:?}",
        params.model, params.mode, params.timeout
    );

    let observer: Arc<dyn SessionObserver> = if output.is_json() {
        Arc::new(SpinnerOnly::new(output.show_progress))
    } else {
        Arc::new(StreamPrinter::new().with_progress(output.show_progress))
    };

    let mut use_case = StreamQueryUseCase::new(generator)
        .with_params(params)
        .with_observer(observer);
    if let Some(logger) = open_conversation_log(&config) {
        use_case = use_case.with_conversation_logger(logger);
    }

    let cancellation = CancellationToken::new();
    let controller = QueryController::new(use_case).with_cancellation(cancellation.clone());

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(controller, output);
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single prompt mode - prompt is required
    let prompt = match cli.prompt {
        Some(p) => p,
        None => bail!("A prompt is required. Use --chat for interactive mode."),
    };

    run_prompt(controller, cancellation, &prompt, &output).await
}

/// Route diagnostics to stderr, or to `log_file` when given.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
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
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Command line flags take priority over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(provider) = cli.provider {
        config.provider.kind = provider.as_str().to_string();
    }
    if let Some(model) = &cli.model {
        config.session.model = Some(model.clone());
    }
    if cli.single_shot {
        config.session.mode = Some("single-shot".to_string());
    }
    if let Some(seconds) = cli.timeout {
        config.session.timeout_seconds = seconds;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
}

fn open_conversation_log(config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = config.logging.conversation_log.as_ref()?;
    match JsonlConversationLogger::open(path) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Some(Arc::new(logger))
        }
        None => {
            warn!("Conversation log disabled: cannot open {}", path.display());
            None
        }
    }
}

/// Run one prompt to completion. Ctrl-C cancels it.
async fn run_prompt(
    mut controller: QueryController,
    cancellation: CancellationToken,
    prompt: &str,
    output: &OutputConfig,
) -> Result<ExitCode> {
    let watch = match controller.start(prompt) {
        Ok(watch) => watch,
        Err(e) => {
            if let Some(message) = e.user_message() {
                eprintln!("{}", ConsoleFormatter::format_error(&message));
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let finished = watch.finished();
    tokio::pin!(finished);

    let snapshot = tokio::select! {
        snapshot = &mut finished => snapshot,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, cancelling query");
            cancellation.cancel();
            controller.cancel();
            finished.as_mut().await
        }
    };
    controller.shutdown().await;

    if output.is_json() {
        println!("{}", ConsoleFormatter::format_json(&snapshot));
    }

    Ok(match snapshot.status {
        SessionStatus::Completed => ExitCode::SUCCESS,
        SessionStatus::Cancelled => ExitCode::from(EXIT_CANCELLED),
        _ => ExitCode::FAILURE,
    })
}
