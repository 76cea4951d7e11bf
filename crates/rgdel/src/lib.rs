//! rgdel - bulk resource group deletion
//!
//! Finds Azure resource groups whose name contains a fragment, clears what
//! blocks their deletion (management locks, disk exports, backup soft
//! delete) and deletes them concurrently. Every remote operation goes
//! through the `az` command-line tool.
//!
//! ## Modules
//!
//! - [`az`]: `az` invocation, error classification and decoded records
//! - [`cleanup`]: per-group cleanup steps and the worker pipeline
//! - [`config`]: run configuration and validation
//! - [`confirm`]: y/n confirmation prompt
//! - [`defaults`]: default values
//! - [`error`]: configuration and prompt errors
//! - [`orchestrator`]: discovery, confirmation and fan-out

pub mod az;
pub mod cleanup;
pub mod config;
pub mod confirm;
pub mod defaults;
pub mod error;
pub mod orchestrator;
