//! outdatedcheck - report Go module requirements that lag behind their latest
//! tagged release
//!
//! Exit status: 0 when nothing is outdated, 1 when at least one module is
//! outdated, 2 when the check could not run.

use clap::Parser;
use outdatedcheck::cli::CliArgs;
use outdatedcheck::config::Config;
use outdatedcheck::manifest::detect_manifest;
use outdatedcheck::orchestrator::Orchestrator;
use outdatedcheck::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status when the check itself failed
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Log to stderr; RUST_LOG takes precedence over the verbosity flags
fn init_tracing(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let output_config = args.output_config();
    if !output_config.color {
        colored::control::set_override(false);
    }

    let manifest = detect_manifest(&args.path)?;
    debug!("using manifest {}", manifest.path.display());

    let config = Config::load(manifest.project_dir(), args.config.as_deref())?;
    let config = args.apply(config)?;

    let orchestrator = Orchestrator::new(config, manifest)?;
    let result = orchestrator
        .run_with_progress(output_config.shows_progress())
        .await?;

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&result.report, &mut stdout)?;
    stdout.flush()?;

    if result.report.has_outdated() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
