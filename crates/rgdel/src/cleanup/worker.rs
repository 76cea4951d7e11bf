//! Per-group worker pipeline and fan-out

use super::backup::purge_backup_state;
use super::disks::revoke_disk_exports;
use super::locks::unlock_group;
use super::mutate;
use super::report::GroupReport;
use crate::az::AzClient;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Clear everything blocking deletion of `group`, then delete it.
///
/// Steps run in order (locks, disk exports, backup state, the group
/// itself). A failing step does not stop the next one: the group delete is
/// always attempted.
pub async fn delete_group(client: &AzClient, group: &str, dry_run: bool) -> GroupReport {
    info!(resource_group = %group, "Starting cleanup");

    let mut report = GroupReport::new(group);
    report.locks = unlock_group(client, group, dry_run).await;
    report.disks = revoke_disk_exports(client, group, dry_run).await;

    let backup = purge_backup_state(client, group, dry_run).await;
    report.vaults = backup.vaults;
    report.backup_items = backup.items;

    report.deletion = mutate(
        "delete resource group",
        group,
        group,
        dry_run,
        client.delete_resource_group(group),
    )
    .await;

    info!(resource_group = %group, result = %report.deletion, "{} del done", group);
    report
}

/// Run [`delete_group`] for every group concurrently and wait for all.
///
/// One task per group. With `max_concurrent` set, at most that many run at
/// once; otherwise all start immediately. Reports come back in the order of
/// `groups`. A task that panics is reported as a failed deletion.
pub async fn delete_groups(
    client: Arc<AzClient>,
    groups: Vec<String>,
    dry_run: bool,
    max_concurrent: Option<usize>,
) -> Vec<GroupReport> {
    run_workers(groups, max_concurrent, move |group| {
        let client = client.clone();
        async move { delete_group(&client, &group, dry_run).await }
    })
    .await
}

/// Spawn `worker` once per group and collect the reports in input order.
async fn run_workers<F, Fut>(
    groups: Vec<String>,
    max_concurrent: Option<usize>,
    worker: F,
) -> Vec<GroupReport>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = GroupReport> + Send + 'static,
{
    let limit = max_concurrent.map(|n| Arc::new(Semaphore::new(n)));

    let handles: Vec<_> = groups
        .iter()
        .map(|group| {
            let limit = limit.clone();
            let work = worker(group.clone());
            tokio::spawn(async move {
                let _permit = match limit {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                work.await
            })
        })
        .collect();

    let results = join_all(handles).await;

    groups
        .into_iter()
        .zip(results)
        .map(|(group, result)| match result {
            Ok(report) => report,
            Err(e) => {
                error!(resource_group = %group, error = %e, "Worker task failed");
                GroupReport::failed(group)
            }
        })
        .collect()
}
