//! Management lock removal

use super::mutate;
use super::report::StepTally;
use crate::az::AzClient;
use crate::defaults::ASR_LOCK_NAME;
use tracing::{debug, warn};

/// Remove every management lock on `group`.
///
/// Locks other than the one Site Recovery places are unexpected; they are
/// removed too, with a warning naming them.
pub async fn unlock_group(client: &AzClient, group: &str, dry_run: bool) -> StepTally {
    let mut tally = StepTally::default();

    let locks = match client.list_group_locks(group).await {
        Ok(locks) => locks,
        Err(e) => {
            warn!(resource_group = %group, error = %e, "Failed to list locks");
            tally.record_list_failure();
            return tally;
        }
    };
    debug!(resource_group = %group, count = locks.len(), "Found locks");

    for lock in locks {
        if lock.name != ASR_LOCK_NAME {
            warn!(
                resource_group = %group,
                lock_id = %lock.id,
                lock_name = %lock.name,
                "Removing lock not placed by Site Recovery"
            );
        }
        let result = mutate(
            "delete lock",
            group,
            &lock.id,
            dry_run,
            client.delete_lock(&lock.id),
        )
        .await;
        tally.record(result);
    }

    tally
}
