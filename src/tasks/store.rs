//! Durable task store with dual-slot redundancy.
//!
//! Tasks are persisted as one JSON document written to two slots of a
//! `SQLite` key-value table. Both slots are written inside one immediate
//! transaction, so a partially-updated pair is never observable. Reads
//! decode the primary slot and fall back to the backup when the primary is
//! corrupt; if both are unusable the store degrades to an empty collection
//! instead of failing.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::prompting::ParsedTask;
use crate::tasks::id::generate_task_id;
use crate::tasks::models::{now_epoch_ms, StoredTaskList, SyncState, TaskItem, TaskPriority};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Key of the primary payload slot.
pub const PRIMARY_SLOT: &str = "tasks_json";

/// Key of the backup payload slot, written in lockstep with the primary.
pub const BACKUP_SLOT: &str = "tasks_json_backup";

/// Trait for task storage operations, the seam consumed by display layers
/// and the assisted-creation collaborator.
///
/// Mutators return a `Result` and may fail with database errors; storage
/// unavailability is surfaced, never swallowed.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore: Send + Sync {
    /// Get the current task collection.
    fn snapshot(&self) -> Vec<TaskItem>;

    /// Subscribe to the live task list. The receiver always holds the latest
    /// committed snapshot and is notified on every change.
    fn subscribe(&self) -> watch::Receiver<Vec<TaskItem>>;

    /// Append a new task. A blank title (after trimming) is a silent no-op.
    fn add(&self, title: &str, priority: TaskPriority) -> Result<()>;

    /// Append assistant-proposed tasks in one mutation, dropping entries
    /// with blank titles and mapping free-text priorities leniently. An
    /// empty surviving batch performs no write at all.
    fn add_batch(&self, parsed: &[ParsedTask]) -> Result<()>;

    /// Flip completion on the matching task, refresh its timestamp, and
    /// mark it `PENDING_RETRY` for the sync collaborator. No-op if the id
    /// is not found.
    fn toggle(&self, id: &str) -> Result<()>;

    /// Remove the matching task. No-op if the id is not found.
    fn delete(&self, id: &str) -> Result<()>;
}

/// SQLite-backed dual-slot task store.
///
/// Mutations are serialized through a write gate, so N concurrent callers
/// are all durably reflected in some total order. Each operation opens its
/// own connection, as the write gate already enforces single-writer
/// semantics.
pub struct SqliteTaskStore {
    db_path: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
    write_gate: Mutex<()>,
    latest: watch::Sender<Vec<TaskItem>>,
}

impl std::fmt::Debug for SqliteTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTaskStore").field("db_path", &self.db_path).finish_non_exhaustive()
    }
}

impl SqliteTaskStore {
    /// Create a store at the given database path, emitting diagnostics via
    /// `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_sink(db_path, Arc::new(TracingSink))
    }

    /// Create a store with an explicit diagnostic sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn with_sink(db_path: impl AsRef<Path>, sink: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let store = Self {
            db_path: db_path.as_ref().to_path_buf(),
            sink,
            write_gate: Mutex::new(()),
            latest: watch::Sender::new(Vec::new()),
        };
        store.init_schema()?;

        // Seed the live view with whatever is already persisted.
        let conn = store.open()?;
        let tasks = store.decode_slots(&conn)?;
        store.latest.send_replace(tasks);
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            -- String-valued storage slots for the task payload and its backup
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    /// Read one slot's raw value, if present.
    fn read_slot(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row("SELECT value FROM slots WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Write one slot's value.
    fn write_slot(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Decode one raw payload. Blank payloads are an empty list; malformed
    /// payloads are a decode failure (`None`) with a diagnostic.
    fn decode_payload(&self, raw: &str) -> Option<Vec<TaskItem>> {
        if raw.trim().is_empty() {
            return Some(Vec::new());
        }
        match serde_json::from_str::<StoredTaskList>(raw) {
            Ok(list) => Some(list.tasks),
            Err(e) => {
                self.sink.warning(
                    "task_store_decode_failure",
                    &format!("Failed to decode persisted task payload: {e}"),
                );
                None
            }
        }
    }

    /// Decode the current persisted state, applying the backup-fallback
    /// recovery algorithm. Both slots unusable is an empty store, not an
    /// error.
    fn decode_slots(&self, conn: &Connection) -> Result<Vec<TaskItem>> {
        let primary = Self::read_slot(conn, PRIMARY_SLOT)?.unwrap_or_default();
        if let Some(tasks) = self.decode_payload(&primary) {
            return Ok(tasks);
        }

        let backup = Self::read_slot(conn, BACKUP_SLOT)?.unwrap_or_default();
        Ok(self.decode_payload(&backup).map_or_else(Vec::new, |tasks| {
            self.sink.warning(
                "task_store_corruption",
                "Primary task payload was invalid; fallback payload was used.",
            );
            tasks
        }))
    }

    /// Apply `mutation` to the current collection in one atomic
    /// read-modify-write transaction and durably persist the result to both
    /// slots before returning.
    ///
    /// Transactions are serialized through the write gate, so every call
    /// observes the effects of every call that committed before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage is unavailable.
    pub fn mutate<F>(&self, mutation: F) -> Result<()>
    where
        F: FnOnce(Vec<TaskItem>) -> Vec<TaskItem>,
    {
        // A poisoned gate means a previous writer panicked mid-closure; the
        // on-disk state is still consistent because its transaction never
        // committed, so the gate itself remains usable.
        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);

        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = self.decode_slots(&tx)?;
        let updated = mutation(current);
        let payload = serde_json::to_string(&StoredTaskList { tasks: updated.clone() })?;
        Self::write_slot(&tx, PRIMARY_SLOT, &payload)?;
        Self::write_slot(&tx, BACKUP_SLOT, &payload)?;
        tx.commit()?;

        self.latest.send_replace(updated);
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn snapshot(&self) -> Vec<TaskItem> {
        self.latest.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Vec<TaskItem>> {
        self.latest.subscribe()
    }

    fn add(&self, title: &str, priority: TaskPriority) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }

        self.mutate(|mut current| {
            let id = generate_task_id(title, |candidate| current.iter().any(|t| t.id == candidate));
            current.push(TaskItem {
                id,
                title: title.to_string(),
                priority,
                completed: false,
                updated_at_epoch_ms: now_epoch_ms(),
                sync_state: SyncState::LocalOnly,
            });
            current
        })
    }

    fn add_batch(&self, parsed: &[ParsedTask]) -> Result<()> {
        let survivors: Vec<(String, TaskPriority)> = parsed
            .iter()
            .filter_map(|p| {
                let title = p.title.trim();
                if title.is_empty() {
                    return None;
                }
                Some((title.to_string(), TaskPriority::parse_lenient(&p.priority)))
            })
            .collect();

        // Avoid an empty-diff write when nothing survived filtering.
        if survivors.is_empty() {
            return Ok(());
        }

        self.mutate(move |mut current| {
            for (title, priority) in survivors {
                let id =
                    generate_task_id(&title, |candidate| current.iter().any(|t| t.id == candidate));
                current.push(TaskItem {
                    id,
                    title,
                    priority,
                    completed: false,
                    updated_at_epoch_ms: now_epoch_ms(),
                    sync_state: SyncState::LocalOnly,
                });
            }
            current
        })
    }

    fn toggle(&self, id: &str) -> Result<()> {
        self.mutate(|current| {
            current
                .into_iter()
                .map(|mut task| {
                    if task.id == id {
                        task.completed = !task.completed;
                        task.updated_at_epoch_ms = now_epoch_ms();
                        task.sync_state = SyncState::PendingRetry;
                    }
                    task
                })
                .collect()
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.mutate(|mut current| {
            current.retain(|task| task.id != id);
            current
        })
    }
}
