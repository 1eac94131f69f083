//! CLI entrypoint for Editorial Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    CouncilProgress, CouncilRequest, DoubtRequest, EditorialCouncil, FlowRequest, NoProgress,
    PolishRequest,
};
use council_domain::{OutputFormat, PromptRegistry};
use council_infrastructure::{ConfigLoader, StyleReferenceLoader, build_backends};
use council_presentation::{
    Cli, Command, ConsoleFormatter, ProgressReporter, set_color_enabled,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let Some(command) = &cli.command else {
        bail!("A mode is required: flow, doubt or polish. See --help.");
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if cli.no_color || !config.output.color {
        set_color_enabled(false);
    }
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    info!(mode = %command.mode(), %format, "Starting Editorial Council");

    let request = build_request(command)?;

    // === Dependency Injection ===
    let style_reference = StyleReferenceLoader::new().load(&config.council.style_reference);
    if style_reference.is_default() {
        warn!("Style consultant is using the built-in reference");
    }
    let prompts = Arc::new(PromptRegistry::new(&style_reference));
    let backends = build_backends(&config.backends)?;
    let council = EditorialCouncil::new(backends, prompts, config.council.to_behavior());

    let progress: Box<dyn CouncilProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let outcome = council
        .run_with_progress(&request, progress.as_ref())
        .await
        .with_context(|| format!("{} request failed", command.mode()))?;

    print!("{}", ConsoleFormatter::render(&outcome, format));
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Initialize logging based on verbosity level, honouring `RUST_LOG` when set
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "editorial-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn build_request(command: &Command) -> Result<CouncilRequest> {
    let request = match command {
        Command::Flow(args) => {
            let input = args.input.resolve().context("failed to read input")?;
            CouncilRequest::Flow(FlowRequest::new(input.text, input.context))
        }
        Command::Doubt(args) => {
            if args.question.trim().is_empty() {
                bail!("The question is empty");
            }
            let input = args.input.resolve().context("failed to read input")?;
            CouncilRequest::Doubt(DoubtRequest::new(args.question.clone(), input.text))
        }
        Command::Polish(args) => {
            let input = args.input.resolve().context("failed to read input")?;
            CouncilRequest::Polish(
                PolishRequest::new(input.text, input.context).with_briefing(args.briefing()),
            )
        }
    };

    let text = match &request {
        CouncilRequest::Flow(req) => &req.current_text,
        CouncilRequest::Doubt(req) => &req.text_context,
        CouncilRequest::Polish(req) => &req.text,
    };
    if text.trim().is_empty() {
        bail!("Nothing to review: the text is empty");
    }

    Ok(request)
}
