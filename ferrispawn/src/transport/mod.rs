//! Process transport wrapping `tokio::process`.
//!
//! This module provides the low-level child process management:
//! spawn configuration, pipe setup and exit-status queries.

pub mod config;
mod process;

pub use config::SpawnConfig;
pub use process::ProcessHandle;
