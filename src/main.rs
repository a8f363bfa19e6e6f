//! CLI binary for `flowtask`.
//!
//! This binary is a thin wrapper that delegates to the library.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    flowtask::cli::run().await
}
