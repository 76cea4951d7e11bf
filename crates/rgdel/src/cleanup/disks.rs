//! Disk export revocation

use super::mutate;
use super::report::StepTally;
use crate::az::AzClient;
use tracing::{debug, warn};

/// Revoke SAS export access on every exported disk in `group`.
///
/// A disk with an active export cannot be deleted, which in turn blocks
/// deletion of its group.
pub async fn revoke_disk_exports(client: &AzClient, group: &str, dry_run: bool) -> StepTally {
    let mut tally = StepTally::default();

    let disks = match client.list_exported_disks(group).await {
        Ok(disks) => disks,
        Err(e) => {
            warn!(resource_group = %group, error = %e, "Failed to list disks");
            tally.record_list_failure();
            return tally;
        }
    };
    debug!(resource_group = %group, count = disks.len(), "Found exported disks");

    for disk in disks {
        debug!(
            disk_id = %disk.id,
            disk_state = disk.disk_state.as_deref().unwrap_or("unknown"),
            "Revoking export"
        );
        let result = mutate(
            "revoke disk access",
            group,
            &disk.id,
            dry_run,
            client.revoke_disk_access(&disk.id),
        )
        .await;
        tally.record(result);
    }

    tally
}
