//! Default configuration values
//!
//! Constants shared by the CLI, the `az` runner and the cleanup steps.

/// Program invoked when no `--az-path` is given
pub const DEFAULT_AZ_PROGRAM: &str = "az";

/// Environment variable overriding the `az` program path
pub const AZ_PATH_ENV: &str = "RGDEL_AZ_PATH";

/// Name of the lock Azure Site Recovery places on replicated groups.
///
/// Any other lock is still removed, but with a warning.
pub const ASR_LOCK_NAME: &str = "ASR-Lock";

/// Disk state fragment marking an active SAS export
pub const ACTIVE_SAS_STATE: &str = "ActiveSAS";

/// Answer accepted by the confirmation prompt
pub const CONFIRM_YES: &str = "y";

/// Prompt shown before deleting anything
pub const CONFIRM_PROMPT: &str = "the above resource groups will be deleted, continue? (y/n)";
