//! Backup vault soft-delete handling
//!
//! A Recovery Services vault with soft delete enabled keeps deleted backup
//! items around for 14 days, and a vault holding backup items cannot be
//! deleted. So for every vault in the group: turn soft delete off, bring
//! back any soft-deleted items, then stop protection and delete their data.

use super::mutate;
use super::report::StepTally;
use crate::az::AzClient;
use crate::az::types::BackupVault;
use tracing::{debug, warn};

/// Tallies for the backup step
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackupTally {
    pub vaults: StepTally,
    pub items: StepTally,
}

/// Disable soft delete and purge backup items in every vault of `group`.
pub async fn purge_backup_state(client: &AzClient, group: &str, dry_run: bool) -> BackupTally {
    let mut tally = BackupTally::default();

    let vaults = match client.list_backup_vaults(group).await {
        Ok(vaults) => vaults,
        Err(e) => {
            warn!(resource_group = %group, error = %e, "Failed to list backup vaults");
            tally.vaults.record_list_failure();
            return tally;
        }
    };
    debug!(resource_group = %group, count = vaults.len(), "Found backup vaults");

    for vault in vaults {
        let result = mutate(
            "disable vault soft delete",
            group,
            &vault.id,
            dry_run,
            client.disable_vault_soft_delete(&vault.id),
        )
        .await;
        tally.vaults.record(result);

        purge_vault_items(client, group, &vault, dry_run, &mut tally.items).await;
    }

    tally
}

async fn purge_vault_items(
    client: &AzClient,
    group: &str,
    vault: &BackupVault,
    dry_run: bool,
    tally: &mut StepTally,
) {
    let items = match client.list_backup_items(group, &vault.name).await {
        Ok(items) => items,
        Err(e) => {
            warn!(
                resource_group = %group,
                vault = %vault.name,
                error = %e,
                "Failed to list backup items"
            );
            tally.record_list_failure();
            return;
        }
    };
    debug!(resource_group = %group, vault = %vault.name, count = items.len(), "Found backup items");

    for item in items {
        // Undelete failing on an item that was never soft-deleted is
        // expected, so its outcome is logged but not counted.
        if item.maybe_soft_deleted() {
            let undeleted = mutate(
                "undelete backup item",
                group,
                &item.id,
                dry_run,
                client.undelete_backup_item(&item.id),
            )
            .await;
            debug!(item_id = %item.id, result = %undeleted, "Undelete finished");
        }

        let result = mutate(
            "disable backup protection",
            group,
            &item.id,
            dry_run,
            client.disable_backup_protection(&item.id),
        )
        .await;
        tally.record(result);
    }
}
