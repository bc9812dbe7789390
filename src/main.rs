use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use flo::config::Config;
use flo::flow::{FlowCli, OutputMode};
use flo::runner::{CommandRunner, DryRunRunner, ProcessRunner};
use flo::setup::ensure_environment;

mod cmd;

#[derive(Parser)]
#[command(name = "flo")]
#[command(
    version,
    about = "Drive claude-flow: hives, swarms, SPARC workflows and project scaffolding"
)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print claude-flow commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Skip the prerequisite checks and installs
    #[arg(long, global = true)]
    pub skip_setup: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Subprocess timeout in seconds, 0 for none. Overrides flo.toml.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project from an idea: documents, scaffold and the SPARC lifecycle
    NewProject {
        idea: String,

        /// Directory that holds the projects (defaults to flo.toml's projects.base_dir)
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Agile, DDD, HighPerformance, CICD, WebApp, CLI-Tool, DataPipeline or Microservices
        #[arg(short, long)]
        template: Option<String>,

        /// Continue with the full automation pass
        #[arg(long)]
        full: bool,
    },
    /// Run claude-flow with the given arguments inside a detached screen session
    RunBg {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Interactive menu in simple or expert mode
    Manager,
    /// Full-screen terminal UI
    Tui,
    #[command(flatten)]
    Flow(cmd::FlowCommand),
}

/// `--verbose` forces debug; otherwise `RUST_LOG` wins over the info default.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Log to stderr and `flo.log`; the TUI logs to the file only.
fn init_tracing(config: &Config, tui: bool) -> WorkerGuard {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(config.verbose, rust_log.as_deref());

    let directory = config
        .log_file
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.project_dir.clone());
    let file_name = config
        .log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| flo::config::LOG_FILE.into());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);
    let stderr_layer = (!tui).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = Config::new(
        project_dir,
        cli.verbose,
        cli.dry_run,
        cli.skip_setup,
        cli.timeout,
    )?;
    let _guard = init_tracing(&config, matches!(cli.command, Commands::Tui));

    let runner: Arc<dyn CommandRunner> = if config.dry_run {
        Arc::new(DryRunRunner::echoing())
    } else {
        Arc::new(ProcessRunner)
    };
    let credentials = ensure_environment(&config, runner.as_ref()).await;

    let output = match cli.command {
        Commands::Tui => OutputMode::Collect,
        _ => OutputMode::Inherit,
    };
    let flow = Arc::new(
        FlowCli::from_config(&config, runner, credentials.child_env()).with_output_mode(output),
    );

    match &cli.command {
        Commands::NewProject {
            idea,
            base_dir,
            template,
            full,
        } => {
            cmd::cmd_new_project(
                &config,
                flow,
                &credentials,
                idea,
                base_dir.as_deref(),
                template.as_deref(),
                *full,
            )
            .await?
        }
        Commands::RunBg { args } => cmd::cmd_run_bg(&flow, args).await?,
        Commands::Manager => cmd::cmd_manager(config, flow, credentials).await?,
        Commands::Tui => cmd::cmd_tui(config, flow, credentials)?,
        Commands::Flow(command) => cmd::cmd_flow(&flow, command).await,
    }

    Ok(())
}
