//! Offline stub assistant.
//!
//! Simulates a remote backend when none is configured: sleeps briefly, then
//! echoes a single-task document derived from the user text in the prompt.

use crate::assistant::{AssistantClient, ClientFailure};
use crate::prompting::AssistantConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Marker preceding the user's free text in the task prompt template.
const USER_MARKER: &str = "User says:";

/// Simulated backend latency.
const SIMULATED_LATENCY: Duration = Duration::from_millis(250);

/// Title used when no user text follows the marker.
const DEFAULT_TITLE: &str = "Review my day";

/// Offline stub variant of [`AssistantClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistantClient;

impl OfflineAssistantClient {
    /// Create an offline client.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AssistantClient for OfflineAssistantClient {
    async fn generate(
        &self,
        prompt: &str,
        _config: &AssistantConfig,
    ) -> Result<String, ClientFailure> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        // Take the first line after the marker so the echoed title stays
        // clear of the template's trailing instructions.
        let raw = prompt
            .split_once(USER_MARKER)
            .map(|(_, rest)| rest.lines().next().unwrap_or("").trim())
            .unwrap_or("");
        let title = if raw.is_empty() { DEFAULT_TITLE } else { raw };

        let document = serde_json::json!({
            "tasks": [{ "title": title, "priority": "NORMAL" }]
        });
        Ok(document.to_string())
    }
}
