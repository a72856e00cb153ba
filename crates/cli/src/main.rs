use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::*;
use gatekeep_core::manager::{TargetManager, TargetManagerConfig};
use gatekeep_core::GatekeepError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter for diagnostic output
const LOG_ENV: &str = "GATEKEEP_LOG";

/// Gatekeep - run code-quality targets and their prerequisites
#[derive(Parser, Debug)]
#[command(name = "gatekeep")]
#[command(about = "Run named code-quality targets and their prerequisites in order")]
#[command(version)]
struct Cli {
    /// Targets to run; defaults to the first declared target
    targets: Vec<String>,

    /// Directory to run commands in (defaults to current directory)
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Target definition file (defaults to gatekeep.yml in the directory, else built-in targets)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the execution plan and commands without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// List defined targets
    #[arg(short, long, conflicts_with_all = ["graph", "schema", "dry_run", "targets"])]
    list: bool,

    /// Show the target dependency graph
    #[arg(long, conflicts_with_all = ["schema", "dry_run", "targets"])]
    graph: bool,

    /// Print the JSON schema of the definition file
    #[arg(long, conflicts_with_all = ["dry_run", "targets"])]
    schema: bool,

    /// Do not print target headers or echo commands
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.schema {
        return commands::schema::execute();
    }

    let manager = TargetManager::new(TargetManagerConfig {
        root: cli.directory,
        definition_file: cli.file,
    })?;

    if cli.list {
        commands::list::execute(&manager)
    } else if cli.graph {
        commands::graph::execute(&manager)
    } else if cli.dry_run {
        commands::plan::execute(&manager, &cli.targets).await
    } else {
        commands::run::execute(&manager, &cli.targets, cli.quiet).await
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The failing command's own exit code when there is one
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<GatekeepError>()
        .map(GatekeepError::exit_code)
        .unwrap_or(1);
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
