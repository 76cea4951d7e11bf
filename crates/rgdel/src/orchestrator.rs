//! Run orchestration
//!
//! Discover matching groups, show them, confirm, fan out one worker per
//! group, then report. Only the initial listing and the confirmation
//! prompt can fail the run; everything after that is logged and counted.

use crate::az::{AzCli, AzClient};
use crate::cleanup::{CleanupReport, delete_groups};
use crate::config::RunConfig;
use crate::confirm::ask_for_confirm;
use crate::defaults::CONFIRM_PROMPT;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The pattern matched no resource group
    NoMatches,
    /// The user answered anything but yes
    Declined,
    /// Workers ran for every matched group
    Completed(CleanupReport),
}

/// Run against the process's stdin and stdout
pub async fn run(config: RunConfig) -> Result<RunOutcome> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_with_io(config, &mut input, &mut output).await
}

/// Run with explicit prompt input and user-facing output
pub async fn run_with_io<R, W>(config: RunConfig, input: &mut R, output: &mut W) -> Result<RunOutcome>
where
    R: BufRead,
    W: Write,
{
    config.validate().context("Invalid configuration")?;

    let client = AzClient::new(AzCli::from_config(&config.az), &config.subscription);

    info!(
        subscription = %config.subscription,
        pattern = %config.pattern,
        dry_run = config.flags.dry_run,
        "Listing resource groups"
    );
    let groups = match client.list_resource_groups(&config.pattern).await {
        Ok(groups) => groups,
        Err(e) => {
            if let Some(hint) = e.suggestion() {
                warn!(hint, "Listing resource groups failed");
            }
            return Err(e).with_context(|| {
                format!(
                    "Failed to list resource groups in subscription {}",
                    config.subscription
                )
            });
        }
    };

    if groups.is_empty() {
        writeln!(output, "no resource groups found")?;
        return Ok(RunOutcome::NoMatches);
    }

    let names: Vec<String> = groups.into_iter().map(|g| g.name).collect();
    for name in &names {
        writeln!(output, "{}", name)?;
    }

    let needs_confirmation = !config.flags.assume_yes && !config.flags.dry_run;
    if needs_confirmation
        && !ask_for_confirm(CONFIRM_PROMPT, input, output)
            .context("Failed to read confirmation")?
    {
        info!("Deletion declined");
        return Ok(RunOutcome::Declined);
    }

    info!(
        count = names.len(),
        max_concurrent = ?config.flags.max_concurrent,
        "Starting resource group workers"
    );
    let reports = delete_groups(
        Arc::new(client),
        names,
        config.flags.dry_run,
        config.flags.max_concurrent,
    )
    .await;

    let report: CleanupReport = reports.into_iter().collect();
    report.write_to(output, config.flags.dry_run)?;
    output.flush()?;

    Ok(RunOutcome::Completed(report))
}
