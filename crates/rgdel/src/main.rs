//! rgdel: bulk-delete Azure resource groups matching a name pattern
//!
//! Clears management locks, disk exports and backup soft-delete state in
//! every matching group, then deletes the groups concurrently.

use anyhow::Result;
use clap::Parser;
use rgdel::config::{AzConfig, RunConfig, RuntimeFlags};
use rgdel::defaults::{AZ_PATH_ENV, DEFAULT_AZ_PROGRAM};
use rgdel::orchestrator::{self, RunOutcome};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rgdel")]
#[command(about = "Bulk-delete Azure resource groups whose name contains a pattern")]
#[command(version)]
struct Args {
    /// Subscription id the resource groups live in
    subscription: String,

    /// Fragment the resource group name must contain
    pattern: String,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,

    /// List what would be cleaned up and deleted without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Path to the Azure CLI
    #[arg(long, env = AZ_PATH_ENV, default_value = DEFAULT_AZ_PROGRAM)]
    az_path: String,

    /// Maximum number of resource groups processed at once (default: all)
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Kill any single az invocation running longer than this many seconds
    #[arg(long)]
    command_timeout: Option<u64>,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            subscription: args.subscription,
            pattern: args.pattern,
            az: AzConfig {
                program: args.az_path,
                leading_args: Vec::new(),
                command_timeout: args.command_timeout.map(Duration::from_secs),
            },
            flags: RuntimeFlags {
                assume_yes: args.yes,
                dry_run: args.dry_run,
                max_concurrent: args.max_concurrent,
            },
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = e
        .downcast_ref::<rgdel::az::AzError>()
        .and_then(|az| az.suggestion())
    {
        let _ = writeln!(stderr, "  \x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the group list, prompt and report
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();

    info!(
        subscription = %args.subscription,
        pattern = %args.pattern,
        dry_run = args.dry_run,
        az_path = %args.az_path,
        "Starting rgdel"
    );

    let config: RunConfig = args.into();
    match orchestrator::run(config).await? {
        RunOutcome::NoMatches => info!("Nothing to delete"),
        RunOutcome::Declined => info!("Aborted by user"),
        RunOutcome::Completed(report) => info!(
            found = report.total_found,
            deleted = report.deleted,
            failed = report.failed,
            "Finished"
        ),
    }

    Ok(())
}
