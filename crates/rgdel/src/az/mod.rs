//! Azure CLI integration
//!
//! Everything that talks to Azure goes through the `az` program:
//!
//! - [`cli`]: process execution
//! - [`client`]: the operations the cleanup pipeline needs
//! - [`error`]: stderr classification
//! - [`query`]: JMESPath filters
//! - [`types`]: decoded records

pub mod cli;
pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use cli::AzCli;
pub use client::AzClient;
pub use error::{AzError, classify_az_error};
