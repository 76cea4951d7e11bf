//! Records decoded from `az` JSON output
//!
//! Only the fields the cleanup steps act on are modelled; everything else
//! in the `az` output is ignored.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// A resource group (`az group list`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceGroup {
    pub name: String,
}

/// A management lock (`az group lock list`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManagementLock {
    pub id: String,
    pub name: String,
}

/// A managed disk (`az disk list`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Disk {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "diskState")]
    pub disk_state: Option<String>,
}

/// A Recovery Services vault (`az backup vault list`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackupVault {
    pub id: String,
    pub name: String,
}

/// A protected backup item (`az backup item list`)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackupItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<BackupItemProperties>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BackupItemProperties {
    #[serde(default)]
    pub is_scheduled_for_deferred_delete: Option<bool>,
}

impl BackupItem {
    /// Whether the item may be in the soft-deleted state.
    ///
    /// Items that do not report the flag are treated as soft-deleted, so
    /// they still get an undelete before protection is disabled.
    pub fn maybe_soft_deleted(&self) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.is_scheduled_for_deferred_delete)
            .unwrap_or(true)
    }
}

/// Decode a JSON array strictly: any malformed element fails the whole list.
pub fn parse_list<T: DeserializeOwned>(stdout: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_slice(stdout)
}

/// Decode a JSON array leniently.
///
/// Elements missing a required field are skipped with a warning. Empty
/// output counts as an empty list (some `az` commands print nothing when
/// there is nothing to list).
pub fn parse_records<T: DeserializeOwned>(
    stdout: &[u8],
    kind: &'static str,
) -> Result<Vec<T>, serde_json::Error> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let values: Vec<serde_json::Value> = serde_json::from_slice(stdout)?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(kind, index, error = %e, "Skipping malformed record"),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_ignores_extra_fields() {
        let json = br#"[
            {"id": "/subscriptions/s/resourceGroups/proj-a", "name": "proj-a", "location": "westeurope"},
            {"name": "proj-b", "tags": null}
        ]"#;
        let groups: Vec<ResourceGroup> = parse_list(json).unwrap();
        assert_eq!(
            groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
            vec!["proj-a", "proj-b"]
        );
    }

    #[test]
    fn test_parse_list_is_strict() {
        let json = br#"[{"name": "ok"}, {"id": "no-name"}]"#;
        assert!(parse_list::<ResourceGroup>(json).is_err());
    }

    #[test]
    fn test_parse_records_skips_malformed() {
        let json = br#"[
            {"id": "/locks/a", "name": "ASR-Lock"},
            {"id": "/locks/b"},
            {"id": "/locks/c", "name": "other"}
        ]"#;
        let locks: Vec<ManagementLock> = parse_records(json, "lock").unwrap();
        assert_eq!(locks.len(), 2);
        assert_eq!(locks[1].name, "other");
    }

    #[test]
    fn test_parse_records_empty_output() {
        let disks: Vec<Disk> = parse_records(b"", "disk").unwrap();
        assert!(disks.is_empty());
        let disks: Vec<Disk> = parse_records(b"  \n", "disk").unwrap();
        assert!(disks.is_empty());
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(parse_records::<Disk>(b"{\"id\": \"x\"}", "disk").is_err());
        assert!(parse_records::<Disk>(b"not json", "disk").is_err());
    }

    #[test]
    fn test_disk_state_field() {
        let json = br#"[{"id": "/disks/d1", "name": "d1", "diskState": "ActiveSAS"}]"#;
        let disks: Vec<Disk> = parse_records(json, "disk").unwrap();
        assert_eq!(disks[0].disk_state.as_deref(), Some("ActiveSAS"));
    }

    #[test]
    fn test_backup_item_soft_delete_flag() {
        let json = br#"[
            {"id": "/items/1", "properties": {"isScheduledForDeferredDelete": true}},
            {"id": "/items/2", "properties": {"isScheduledForDeferredDelete": false}},
            {"id": "/items/3", "properties": {}},
            {"id": "/items/4"}
        ]"#;
        let items: Vec<BackupItem> = parse_records(json, "backup item").unwrap();
        let flags: Vec<bool> = items.iter().map(BackupItem::maybe_soft_deleted).collect();
        assert_eq!(flags, vec![true, false, true, true]);
    }
}
