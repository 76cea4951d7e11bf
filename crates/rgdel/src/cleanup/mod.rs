//! Per-resource-group cleanup
//!
//! Each step lists one kind of obstacle in a group and removes it. Steps
//! never fail: every error is logged and counted, and the worker moves on
//! to the next step.
//!
//! - [`locks`]: management locks
//! - [`disks`]: active disk exports
//! - [`backup`]: vault soft delete and soft-deleted backup items
//! - [`worker`]: the per-group pipeline and the fan-out across groups
//! - [`report`]: outcome tallies

pub mod backup;
pub mod disks;
pub mod locks;
pub mod report;
pub mod worker;

pub use report::{CleanupReport, CleanupResult, GroupReport, StepTally};
pub use worker::{delete_group, delete_groups};

use crate::az::AzError;
use std::future::Future;
use tracing::{info, warn};

/// Run one mutation, or log what it would do in dry-run mode.
///
/// The operation future is only awaited outside dry-run mode, so nothing
/// is sent to Azure when `dry_run` is set. A "not found" failure means the
/// target is already gone and counts as success.
pub(crate) async fn mutate<F>(
    action: &'static str,
    group: &str,
    target: &str,
    dry_run: bool,
    op: F,
) -> CleanupResult
where
    F: Future<Output = Result<(), AzError>>,
{
    if dry_run {
        info!(resource_group = %group, resource_id = %target, "[DRY RUN] Would {}", action);
        return CleanupResult::Skipped;
    }

    match op.await {
        Ok(()) => {
            info!(resource_group = %group, resource_id = %target, action, "Done");
            CleanupResult::Deleted
        }
        Err(e) if e.is_not_found() => {
            info!(resource_group = %group, resource_id = %target, action, "Already gone");
            CleanupResult::AlreadyDeleted
        }
        Err(e) => {
            warn!(
                resource_group = %group,
                resource_id = %target,
                action,
                error = %e,
                suggestion = e.suggestion().unwrap_or(""),
                "Failed"
            );
            CleanupResult::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_dry_run_never_awaits() {
        let ran = AtomicBool::new(false);
        let result = mutate("delete lock", "rg", "/locks/l", true, async {
            ran.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert_eq!(result, CleanupResult::Skipped);
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_outcomes() {
        let ok = mutate("x", "rg", "t", false, async { Ok(()) }).await;
        assert_eq!(ok, CleanupResult::Deleted);

        let gone = mutate("x", "rg", "t", false, async {
            Err(AzError::NotFound {
                message: "gone".to_string(),
            })
        })
        .await;
        assert_eq!(gone, CleanupResult::AlreadyDeleted);

        let failed = mutate("x", "rg", "t", false, async { Err(AzError::Throttled) }).await;
        assert_eq!(failed, CleanupResult::Failed);
    }
}
