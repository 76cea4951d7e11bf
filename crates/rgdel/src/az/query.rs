//! JMESPath queries passed to `az --query`

use crate::defaults::ACTIVE_SAS_STATE;

/// Query selecting resource groups whose name contains `pattern`.
pub fn name_contains(pattern: &str) -> String {
    contains("name", pattern)
}

/// Query selecting disks with an active SAS export.
pub fn active_sas_disks() -> String {
    contains("diskState", ACTIVE_SAS_STATE)
}

fn contains(field: &str, needle: &str) -> String {
    format!("[?contains({field},'{}')]", escape_raw_string(needle))
}

/// Escape a value for a JMESPath raw string literal (`'...'`).
///
/// The parser only unescapes `\'` inside a raw string; a backslash before
/// anything else is kept literally.
pub fn escape_raw_string(value: &str) -> String {
    value.replace('\'', r"\'")
}
