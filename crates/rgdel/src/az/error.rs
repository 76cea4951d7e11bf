//! `az` error classification and handling
//!
//! `az` reports failures as free text on stderr, usually of the form
//! `ERROR: (Code) message` followed by `Code:`/`Message:` lines. This module
//! pulls the error code out of that text and maps it onto typed errors.

use thiserror::Error;

/// `az` error categories for cleanup and reporting logic
#[derive(Debug, Error)]
pub enum AzError {
    /// Resource was not found (already gone)
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// No logged-in account
    #[error("Not logged in to Azure: {message}")]
    NotLoggedIn { message: String },

    /// Caller lacks permission for the operation
    #[error("Authorization failed: {message}")]
    AuthorizationFailed { message: String },

    /// A management lock blocks the operation
    #[error("Scope is locked: {message}")]
    ScopeLocked { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Any other non-zero exit
    #[error("az error: {message}")]
    Cli {
        code: Option<String>,
        message: String,
    },

    /// The program could not be started
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The invocation ran past the configured timeout and was killed
    #[error("'{command}' timed out after {secs}s")]
    TimedOut { command: String, secs: u64 },

    /// Output was not the expected JSON
    #[error("Failed to decode az output: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AzError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AzError::NotFound { .. })
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AzError::NotLoggedIn { .. } => Some("Run 'az login' and retry."),
            AzError::AuthorizationFailed { .. } => {
                Some("Check the role assignments of the logged-in account on this subscription.")
            }
            AzError::ScopeLocked { .. } => {
                Some("A lock outside the resource group (e.g. on the subscription) blocks deletion.")
            }
            AzError::Throttled => Some("Azure Resource Manager rate limit hit. Retry later."),
            AzError::Spawn { .. } => Some("Install the Azure CLI or point --az-path at it."),
            AzError::Cli { code: Some(c), .. } => suggestion_for_code(c),
            _ => None,
        }
    }
}

/// Known codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "ResourceGroupNotFound",
    "ResourceNotFound",
    "NotFound",
    "LockNotFound",
    "BMSUserErrorNotFound",
];

/// Known codes for throttling
const THROTTLING_CODES: &[&str] = &["TooManyRequests", "Throttled", "SubscriptionRequestsThrottled"];

/// Known codes for missing permissions
const AUTHORIZATION_CODES: &[&str] = &["AuthorizationFailed", "LinkedAuthorizationFailed"];

/// Known codes for lock conflicts
const LOCK_CODES: &[&str] = &["ScopeLocked"];

/// Classify a failed invocation from its stderr text.
pub fn classify_az_error(stderr: &str) -> AzError {
    let message = clean_message(stderr);

    if stderr.contains("az login") {
        return AzError::NotLoggedIn { message };
    }

    let code = extract_error_code(stderr);
    match code.as_deref() {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AzError::NotFound { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AzError::Throttled,
        Some(c) if AUTHORIZATION_CODES.contains(&c) => AzError::AuthorizationFailed { message },
        Some(c) if LOCK_CODES.contains(&c) => AzError::ScopeLocked { message },
        None if stderr.contains("could not be found") => AzError::NotFound { message },
        _ => AzError::Cli { code, message },
    }
}

/// Extract the error code from `az` stderr text.
///
/// Prefers an explicit `Code: X` line, then a leading `(X)` after the
/// `ERROR:` marker.
fn extract_error_code(stderr: &str) -> Option<String> {
    for line in stderr.lines() {
        if let Some(code) = line.trim().strip_prefix("Code:") {
            let code = code.trim();
            if !code.is_empty() {
                return Some(code.to_string());
            }
        }
    }

    let rest = stderr.trim_start();
    let rest = rest.strip_prefix("ERROR:").unwrap_or(rest).trim_start();
    let inner = rest.strip_prefix('(')?;
    let end = inner.find(')')?;
    let code = &inner[..end];
    if !code.is_empty() && !code.contains(char::is_whitespace) {
        return Some(code.to_string());
    }

    None
}

/// First line of the error text without the `ERROR:` marker
fn clean_message(stderr: &str) -> String {
    let first = stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("Unknown error");
    first
        .strip_prefix("ERROR:")
        .unwrap_or(first)
        .trim()
        .to_string()
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "SubscriptionNotFound",
        "Check the subscription id, or run 'az account list' to see available subscriptions.",
    ),
    (
        "InvalidSubscriptionId",
        "Check the subscription id, or run 'az account list' to see available subscriptions.",
    ),
    (
        "UserErrorBackupDataPresent",
        "Backup data remains in the vault; purge backup items before deleting the group.",
    ),
    (
        "ResourceGroupDeletionBlocked",
        "A resource in the group cannot be deleted; check the activity log for the blocking resource.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<&'static str> {
    SUGGESTIONS.iter().find(|(c, _)| *c == code).map(|(_, s)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            let stderr = format!("ERROR: ({code}) gone\nCode: {code}\nMessage: gone");
            let err = classify_az_error(&stderr);
            assert!(err.is_not_found(), "Expected NotFound for code: {code}");
        }
    }

    #[test]
    fn not_found_without_code() {
        let err = classify_az_error("ERROR: Resource group 'rg-x' could not be found.");
        assert!(err.is_not_found());
    }

    #[test]
    fn not_logged_in() {
        let err = classify_az_error("ERROR: Please run 'az login' to setup account.");
        assert!(matches!(err, AzError::NotLoggedIn { .. }));
        assert_eq!(err.suggestion(), Some("Run 'az login' and retry."));
    }

    #[test]
    fn throttling_and_locks() {
        let err = classify_az_error("ERROR: (TooManyRequests) slow down");
        assert!(matches!(err, AzError::Throttled));

        let err = classify_az_error(
            "ERROR: (ScopeLocked) The scope '/subscriptions/x' cannot perform delete operation",
        );
        assert!(matches!(err, AzError::ScopeLocked { .. }));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn authorization_failed() {
        let err = classify_az_error(
            "ERROR: (AuthorizationFailed) The client 'x' does not have authorization\nCode: AuthorizationFailed",
        );
        assert!(matches!(err, AzError::AuthorizationFailed { .. }));
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_az_error("ERROR: (SomeNewError) details");
        match err {
            AzError::Cli { code, message } => {
                assert_eq!(code.as_deref(), Some("SomeNewError"));
                assert_eq!(message, "(SomeNewError) details");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let err = classify_az_error("something failed");
        assert!(matches!(err, AzError::Cli { code: None, .. }));

        let err = classify_az_error("");
        match err {
            AzError::Cli { message, .. } => assert_eq!(message, "Unknown error"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn code_line_preferred_over_parenthesised() {
        let stderr = "ERROR: (Outer) text\nCode: Inner\nMessage: text";
        assert_eq!(extract_error_code(stderr).as_deref(), Some("Inner"));
    }

    #[test]
    fn parenthesised_text_with_spaces_is_not_a_code() {
        assert!(extract_error_code("ERROR: (not a code) text").is_none());
        assert!(extract_error_code("connection refused").is_none());
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            let err = AzError::Cli {
                code: Some((*code).to_string()),
                message: String::new(),
            };
            assert!(err.suggestion().is_some(), "No suggestion for code: {code}");
        }
        assert!(suggestion_for_code("SomeUnknownCode").is_none());
    }
}
