//! Unique resource group names for tests

use chrono::Utc;

/// Generate a unique resource group name for a test.
///
/// Format: `{prefix}-{timestamp_ms}-{counter}`, so groups created by tests
/// that start at the same millisecond still differ.
///
/// # Example
///
/// ```
/// use rgdel_test_utils::names::test_group_name;
///
/// let name = test_group_name("rg-test");
/// assert!(name.starts_with("rg-test-"));
/// ```
pub fn test_group_name(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, ts, counter)
}
