//! Run configuration
//!
//! `RunConfig` is built from the parsed CLI arguments and validated before
//! anything talks to `az`.

use crate::defaults::DEFAULT_AZ_PROGRAM;
use crate::error::ConfigError;
use std::time::Duration;

/// Where and how to invoke `az`
#[derive(Debug, Clone)]
pub struct AzConfig {
    /// Program to run (normally `az`)
    pub program: String,
    /// Arguments placed before every `az` argument list
    pub leading_args: Vec<String>,
    /// Per-invocation timeout (None = wait forever)
    pub command_timeout: Option<Duration>,
}

impl Default for AzConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_AZ_PROGRAM.to_string(),
            leading_args: Vec::new(),
            command_timeout: None,
        }
    }
}

/// Runtime behaviour flags
#[derive(Debug, Clone, Default)]
pub struct RuntimeFlags {
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    /// List everything but change nothing
    pub dry_run: bool,
    /// Bound on concurrently running group workers (None = one per group)
    pub max_concurrent: Option<usize>,
}

/// Complete configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Subscription the groups live in
    pub subscription: String,
    /// Fragment the group name must contain
    pub pattern: String,
    pub az: AzConfig,
    pub flags: RuntimeFlags,
}

impl RunConfig {
    /// Create a config with default `az` settings and flags
    pub fn new(subscription: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            subscription: subscription.into(),
            pattern: pattern.into(),
            az: AzConfig::default(),
            flags: RuntimeFlags::default(),
        }
    }

    /// Check every field before any remote call is made
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscription.trim().is_empty() {
            return Err(ConfigError::EmptySubscription);
        }
        if self.pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if self.az.program.trim().is_empty() {
            return Err(ConfigError::EmptyAzProgram);
        }
        if let Some(n) = self.flags.max_concurrent {
            if n == 0 {
                return Err(ConfigError::InvalidMaxConcurrent(n));
            }
        }
        if self.az.command_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidCommandTimeout);
        }
        Ok(())
    }
}
