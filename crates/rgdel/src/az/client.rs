//! Azure operations used by the cleanup pipeline
//!
//! Each method is one `az` invocation. Group-scoped calls always carry
//! `--subscription` so they hit the same subscription the groups were
//! listed from, not whatever `az account show` happens to point at.

use super::cli::AzCli;
use super::error::AzError;
use super::query;
use super::types::{BackupItem, BackupVault, Disk, ManagementLock, ResourceGroup, parse_list};

/// Client for one subscription
#[derive(Debug, Clone)]
pub struct AzClient {
    cli: AzCli,
    subscription: String,
}

impl AzClient {
    pub fn new(cli: AzCli, subscription: impl Into<String>) -> Self {
        Self {
            cli,
            subscription: subscription.into(),
        }
    }

    /// List resource groups whose name contains `pattern`.
    ///
    /// Decoding is strict: a listing we cannot fully read is not a safe
    /// basis for deleting anything.
    pub async fn list_resource_groups(&self, pattern: &str) -> Result<Vec<ResourceGroup>, AzError> {
        let query = query::name_contains(pattern);
        let stdout = self
            .cli
            .run(&[
                "group",
                "list",
                "--query",
                &query,
                "--subscription",
                &self.subscription,
            ])
            .await?;
        Ok(parse_list(&stdout)?)
    }

    /// List management locks on a resource group
    pub async fn list_group_locks(&self, group: &str) -> Result<Vec<ManagementLock>, AzError> {
        self.cli
            .run_list(
                &[
                    "group",
                    "lock",
                    "list",
                    "--resource-group",
                    group,
                    "--subscription",
                    &self.subscription,
                ],
                "lock",
            )
            .await
    }

    /// Delete a lock by resource id
    pub async fn delete_lock(&self, lock_id: &str) -> Result<(), AzError> {
        self.cli.run_unit(&["lock", "delete", "--ids", lock_id]).await
    }

    /// List disks in a group with an active SAS export
    pub async fn list_exported_disks(&self, group: &str) -> Result<Vec<Disk>, AzError> {
        let query = query::active_sas_disks();
        self.cli
            .run_list(
                &[
                    "disk",
                    "list",
                    "--resource-group",
                    group,
                    "--query",
                    &query,
                    "--subscription",
                    &self.subscription,
                ],
                "disk",
            )
            .await
    }

    /// Revoke SAS export access on a disk
    pub async fn revoke_disk_access(&self, disk_id: &str) -> Result<(), AzError> {
        self.cli
            .run_unit(&["disk", "revoke-access", "--ids", disk_id])
            .await
    }

    /// List Recovery Services vaults in a group
    pub async fn list_backup_vaults(&self, group: &str) -> Result<Vec<BackupVault>, AzError> {
        self.cli
            .run_list(
                &[
                    "backup",
                    "vault",
                    "list",
                    "--resource-group",
                    group,
                    "--subscription",
                    &self.subscription,
                ],
                "backup vault",
            )
            .await
    }

    /// Turn off soft delete on a vault
    pub async fn disable_vault_soft_delete(&self, vault_id: &str) -> Result<(), AzError> {
        self.cli
            .run_unit(&[
                "backup",
                "vault",
                "backup-properties",
                "set",
                "--ids",
                vault_id,
                "--soft-delete-feature-state",
                "disable",
            ])
            .await
    }

    /// List backup items protected by a vault
    pub async fn list_backup_items(
        &self,
        group: &str,
        vault_name: &str,
    ) -> Result<Vec<BackupItem>, AzError> {
        self.cli
            .run_list(
                &[
                    "backup",
                    "item",
                    "list",
                    "--resource-group",
                    group,
                    "--vault-name",
                    vault_name,
                    "--subscription",
                    &self.subscription,
                ],
                "backup item",
            )
            .await
    }

    /// Bring a soft-deleted backup item back so it can be deleted for good
    pub async fn undelete_backup_item(&self, item_id: &str) -> Result<(), AzError> {
        self.cli
            .run_unit(&["backup", "protection", "undelete", "--ids", item_id])
            .await
    }

    /// Stop protection on a backup item and delete its backup data
    pub async fn disable_backup_protection(&self, item_id: &str) -> Result<(), AzError> {
        self.cli
            .run_unit(&[
                "backup",
                "protection",
                "disable",
                "--ids",
                item_id,
                "--delete-backup-data",
                "true",
                "--yes",
            ])
            .await
    }

    /// Delete a resource group and wait for completion
    pub async fn delete_resource_group(&self, group: &str) -> Result<(), AzError> {
        self.cli
            .run_unit(&[
                "group",
                "delete",
                "--resource-group",
                group,
                "--yes",
                "--subscription",
                &self.subscription,
            ])
            .await
    }
}
