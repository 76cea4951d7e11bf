//! Cleanup outcomes and reporting

use std::fmt;
use std::io::{self, Write};

/// Result of a single mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupResult {
    /// Resource was successfully changed or deleted
    Deleted,
    /// Resource was already gone (not found)
    AlreadyDeleted,
    /// Operation failed with error
    Failed,
    /// Operation was skipped (dry run)
    Skipped,
}

impl CleanupResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CleanupResult::Deleted => "deleted",
            CleanupResult::AlreadyDeleted => "already deleted",
            CleanupResult::Failed => "failed",
            CleanupResult::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CleanupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts for one kind of sub-resource
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepTally {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl StepTally {
    pub fn record(&mut self, result: CleanupResult) {
        match result {
            CleanupResult::Deleted | CleanupResult::AlreadyDeleted => self.succeeded += 1,
            CleanupResult::Failed => self.failed += 1,
            CleanupResult::Skipped => self.skipped += 1,
        }
    }

    /// Record a listing that could not be read
    pub fn record_list_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    fn merge(&mut self, other: &StepTally) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for StepTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ok, {} failed, {} skipped",
            self.succeeded, self.failed, self.skipped
        )
    }
}

/// Everything one worker did to one resource group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub name: String,
    pub locks: StepTally,
    pub disks: StepTally,
    pub vaults: StepTally,
    pub backup_items: StepTally,
    pub deletion: CleanupResult,
}

impl GroupReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locks: StepTally::default(),
            disks: StepTally::default(),
            vaults: StepTally::default(),
            backup_items: StepTally::default(),
            deletion: CleanupResult::Skipped,
        }
    }

    /// Report for a worker that never finished (panicked)
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            deletion: CleanupResult::Failed,
            ..Self::new(name)
        }
    }
}

/// Report of a whole run
#[derive(Default, Debug)]
pub struct CleanupReport {
    pub total_found: usize,
    pub locks: StepTally,
    pub disks: StepTally,
    pub vaults: StepTally,
    pub backup_items: StepTally,
    pub deleted: usize,
    pub already_deleted: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Groups whose deletion failed
    pub failed_groups: Vec<String>,
}

impl CleanupReport {
    pub fn add(&mut self, group: &GroupReport) {
        self.locks.merge(&group.locks);
        self.disks.merge(&group.disks);
        self.vaults.merge(&group.vaults);
        self.backup_items.merge(&group.backup_items);

        match group.deletion {
            CleanupResult::Deleted => self.deleted += 1,
            CleanupResult::AlreadyDeleted => self.already_deleted += 1,
            CleanupResult::Failed => {
                self.failed += 1;
                self.failed_groups.push(group.name.clone());
            }
            CleanupResult::Skipped => self.skipped += 1,
        }
    }

    /// Write the report in human-readable form
    pub fn write_to<W: Write>(&self, out: &mut W, dry_run: bool) -> io::Result<()> {
        let mode = if dry_run { "DRY-RUN" } else { "EXECUTE" };

        writeln!(out, "\n=== Cleanup Report ===")?;
        writeln!(out, "Mode: {}", mode)?;
        writeln!(out)?;
        writeln!(out, "Resource groups found: {}", self.total_found)?;
        writeln!(out, "  Locks:          {}", self.locks)?;
        writeln!(out, "  Disk exports:   {}", self.disks)?;
        writeln!(out, "  Backup vaults:  {}", self.vaults)?;
        writeln!(out, "  Backup items:   {}", self.backup_items)?;
        writeln!(out)?;
        if dry_run {
            writeln!(out, "Skipped: {} (dry-run mode)", self.skipped)?;
            writeln!(out)?;
            writeln!(out, "Run without --dry-run to actually delete resource groups.")?;
        } else {
            writeln!(out, "Deleted:         {}", self.deleted)?;
            writeln!(out, "Already deleted: {}", self.already_deleted)?;
            writeln!(out, "Failed:          {}", self.failed)?;
            for name in &self.failed_groups {
                writeln!(out, "  {}", name)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<GroupReport> for CleanupReport {
    fn from_iter<I: IntoIterator<Item = GroupReport>>(iter: I) -> Self {
        let mut report = CleanupReport::default();
        for group in iter {
            report.total_found += 1;
            report.add(&group);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_record() {
        let mut tally = StepTally::default();
        tally.record(CleanupResult::Deleted);
        tally.record(CleanupResult::AlreadyDeleted);
        tally.record(CleanupResult::Failed);
        tally.record(CleanupResult::Skipped);
        tally.record_list_failure();
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.failed, 2);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.to_string(), "2 ok, 2 failed, 1 skipped");
    }

    #[test]
    fn test_report_aggregates_groups() {
        let mut a = GroupReport::new("rg-a");
        a.locks.record(CleanupResult::Deleted);
        a.deletion = CleanupResult::Deleted;

        let mut b = GroupReport::new("rg-b");
        b.locks.record(CleanupResult::Failed);
        b.backup_items.record(CleanupResult::Deleted);
        b.deletion = CleanupResult::Failed;

        let c = GroupReport {
            deletion: CleanupResult::AlreadyDeleted,
            ..GroupReport::new("rg-c")
        };

        let report: CleanupReport = vec![a, b, c].into_iter().collect();
        assert_eq!(report.total_found, 3);
        assert_eq!(report.deleted, 1);
        assert_eq!(report.already_deleted, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failed_groups, vec!["rg-b".to_string()]);
        assert_eq!(report.locks.succeeded, 1);
        assert_eq!(report.locks.failed, 1);
        assert_eq!(report.backup_items.succeeded, 1);
    }

    #[test]
    fn test_write_report() {
        let mut b = GroupReport::new("rg-b");
        b.deletion = CleanupResult::Failed;
        let report: CleanupReport = vec![b].into_iter().collect();

        let mut out = Vec::new();
        report.write_to(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("=== Cleanup Report ==="));
        assert!(text.contains("Mode: EXECUTE"));
        assert!(text.contains("Failed:          1\n  rg-b\n"));

        let mut out = Vec::new();
        report.write_to(&mut out, true).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Mode: DRY-RUN"));
    }

    #[test]
    fn test_failed_group_report() {
        let report = GroupReport::failed("rg-x");
        assert_eq!(report.deletion, CleanupResult::Failed);
        assert_eq!(report.locks.total(), 0);
    }
}
