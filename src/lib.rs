//! # `flowtask`
//!
//! Personal task tracker with a durable dual-slot task store and an
//! assisted-creation pipeline backed by an interchangeable remote assistant.

pub mod assistant;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod diagnostics;
pub mod error;
pub mod paths;
pub mod prompting;
pub mod tasks;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
