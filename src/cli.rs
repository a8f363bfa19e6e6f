//! Command-line interface.
//!
//! Thin shell over the library: wires config, store, and pipeline together
//! and formats output. No business logic lives here.

use crate::assistant::{
    HttpAssistantClient, OfflineAssistantClient, SelectingAssistantClient, SessionTokenSource,
    StaticSessionToken,
};
use crate::config::AppConfig;
use crate::conversation::{ConversationOutcome, ConversationPipeline};
use crate::prompting::ContextState;
use crate::tasks::{SqliteTaskStore, TaskPriority, TaskStore};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

/// Personal task tracker with assisted task creation.
#[derive(Debug, Parser)]
#[command(name = "flowtask", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task directly.
    Add {
        /// Task title.
        title: String,
        /// Priority: low, normal, or high.
        #[arg(long, default_value = "normal")]
        priority: String,
    },
    /// List all tasks.
    List,
    /// Toggle a task's completion by id.
    Toggle {
        /// Task id.
        id: String,
    },
    /// Delete a task by id.
    Delete {
        /// Task id.
        id: String,
    },
    /// Describe tasks in free text and let the assistant propose them.
    Chat {
        /// What you want to get done.
        text: String,
    },
}

/// Run the CLI. Exits via clap on argument errors.
pub async fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(data_dir) = crate::paths::data_dir() else {
        eprintln!("Could not determine home directory");
        return ExitCode::FAILURE;
    };

    let config = match AppConfig::load_from(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match SqliteTaskStore::new(data_dir.join(crate::paths::DATABASE_FILENAME)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open task store: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(cli.command, &store, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(
    command: Command,
    store: &SqliteTaskStore,
    config: &AppConfig,
) -> Result<(), String> {
    match command {
        Command::Add { title, priority } => {
            store
                .add(&title, TaskPriority::parse_lenient(&priority))
                .map_err(|e| format!("Failed to add task: {e}"))?;
            print_tasks(store);
            Ok(())
        }
        Command::List => {
            print_tasks(store);
            Ok(())
        }
        Command::Toggle { id } => {
            store.toggle(&id).map_err(|e| format!("Failed to toggle task: {e}"))?;
            print_tasks(store);
            Ok(())
        }
        Command::Delete { id } => {
            store.delete(&id).map_err(|e| format!("Failed to delete task: {e}"))?;
            print_tasks(store);
            Ok(())
        }
        Command::Chat { text } => chat(&text, store, config).await,
    }
}

async fn chat(text: &str, store: &SqliteTaskStore, config: &AppConfig) -> Result<(), String> {
    let token_source: Arc<dyn SessionTokenSource> = match &config.session_token {
        Some(token) => Arc::new(StaticSessionToken(token.clone())),
        None => Arc::new(crate::assistant::NoSessionToken),
    };
    let client = SelectingAssistantClient::new(
        config.use_offline_assistant || !config.has_backend(),
        Arc::new(OfflineAssistantClient::new()),
        Arc::new(HttpAssistantClient::with_token_source(config.backend_url.clone(), token_source)),
    );
    let pipeline = ConversationPipeline::new(Arc::new(client));

    let snapshot = store.snapshot();
    let context = ContextState {
        active_task_count: snapshot.iter().filter(|t| !t.completed).count(),
        time_of_day: time_of_day_now(),
        recent_activity: Vec::new(),
    };

    match pipeline.handle(text, &context).await {
        ConversationOutcome::Completed { tasks, parse_error, .. } => {
            if let Some(error) = parse_error {
                println!("No tasks found: {}", error.reason);
                return Ok(());
            }
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }
            store.add_batch(&tasks).map_err(|e| format!("Failed to store tasks: {e}"))?;
            println!("Added {} task(s).", tasks.len());
            print_tasks(store);
            Ok(())
        }
        ConversationOutcome::ClientFailed(failure) => {
            Err(format!("Assistant unavailable ({}): {}", failure.kind, failure.message))
        }
    }
}

fn print_tasks(store: &SqliteTaskStore) {
    let tasks = store.snapshot();
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        println!("[{mark}] [{}] {} ({})", task.priority, task.title, task.id);
    }
}

fn time_of_day_now() -> String {
    use chrono::Timelike;
    let hour = chrono::Local::now().hour();
    let label = match hour {
        5..=11 => "morning",
        12..=16 => "afternoon",
        17..=21 => "evening",
        _ => "night",
    };
    label.to_string()
}
