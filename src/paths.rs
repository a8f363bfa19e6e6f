//! Path utilities for determining data storage locations.
//!
//! All durable state lives under `~/.flowtask/`: the task database and the
//! app configuration file.

use std::path::PathBuf;

/// The base directory name for flowtask data.
const DATA_DIR_NAME: &str = ".flowtask";

/// The task database filename.
pub const DATABASE_FILENAME: &str = "tasks.sqlite3";

/// The app configuration filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory for flowtask.
///
/// Returns `~/.flowtask/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the task database path.
///
/// Returns `~/.flowtask/tasks.sqlite3`, or `None` if the home directory
/// cannot be determined.
#[must_use]
pub fn db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the app configuration path.
///
/// Returns `~/.flowtask/config.yaml`, or `None` if the home directory
/// cannot be determined.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
