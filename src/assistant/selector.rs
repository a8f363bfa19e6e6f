//! Configuration-driven routing between assistant client variants.

use crate::assistant::{AssistantClient, ClientFailure};
use crate::prompting::AssistantConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Routes every call to either the offline or the HTTP client based on a
/// single boolean switch. No other logic lives here; callers depend on one
/// capability regardless of runtime configuration.
pub struct SelectingAssistantClient {
    use_offline: bool,
    offline: Arc<dyn AssistantClient>,
    http: Arc<dyn AssistantClient>,
}

impl SelectingAssistantClient {
    /// Create a selector.
    #[must_use]
    pub fn new(
        use_offline: bool,
        offline: Arc<dyn AssistantClient>,
        http: Arc<dyn AssistantClient>,
    ) -> Self {
        Self { use_offline, offline, http }
    }
}

#[async_trait]
impl AssistantClient for SelectingAssistantClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &AssistantConfig,
    ) -> Result<String, ClientFailure> {
        if self.use_offline {
            self.offline.generate(prompt, config).await
        } else {
            self.http.generate(prompt, config).await
        }
    }
}
