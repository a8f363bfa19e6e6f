//! Durable task storage.
//!
//! This module provides the canonical task collection:
//! - Task records with priority, completion, and sync state
//! - A dual-slot persistence scheme (primary + backup payload, written in
//!   lockstep) with backup fallback on corruption
//! - Linearized mutations safe under concurrent writers
//! - A live, observable read view for display layers
//!
//! # Example
//!
//! ```no_run
//! use flowtask::tasks::{SqliteTaskStore, TaskPriority, TaskStore};
//!
//! let store = SqliteTaskStore::new("/tmp/tasks.sqlite3").unwrap();
//! store.add("Water the plants", TaskPriority::Low).unwrap();
//! let tasks = store.snapshot();
//! assert_eq!(tasks[0].title, "Water the plants");
//! ```

pub mod id;
pub mod models;
pub mod store;

pub use models::{now_epoch_ms, StoredTaskList, SyncState, TaskItem, TaskPriority};
pub use store::{SqliteTaskStore, TaskStore, BACKUP_SLOT, PRIMARY_SLOT};
