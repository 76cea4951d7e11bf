//! Shared test utilities for rgdel
//!
//! This crate provides common test helpers that can be used across
//! unit tests and integration tests without circular dependencies.
//!
//! ## Modules
//!
//! - [`fake_az`]: scripted stand-in for the `az` binary
//! - [`names`]: unique resource group names for tests

pub mod fake_az;
pub mod names;

// Re-export commonly used items
pub use fake_az::{FakeAz, FakeAzBuilder};
pub use names::test_group_name;
