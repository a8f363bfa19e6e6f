//! Assisted task creation pipeline.
//!
//! Orchestrates prompt injection, assistant generation, and structured
//! parsing into one uniform outcome. The pipeline never retries and never
//! mutates the task store; appending accepted tasks is the caller's job, so
//! store durability and assistant invocation stay independently testable.

use crate::assistant::{AssistantClient, ClientFailure};
use crate::prompting::{
    AssistantConfig, ContextState, ParseError, ParsedTask, PromptInjector, PromptTemplate,
    StructuredResponseParser,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// The fixed task-creation template.
static TASK_TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate {
    id: "task_create_v1".to_string(),
    system_instruction: "You are a task assistant. Return strict JSON only.".to_string(),
    prompt_structure: concat!(
        "Active tasks: {activeTaskCount}\n",
        "Time of day: {timeOfDay}\n",
        "User says: {userInput}\n",
        r#"Return JSON in shape: {"tasks":[{"title":"...", "priority":"LOW|NORMAL|HIGH"}]}"#,
    )
    .to_string(),
});

/// Outcome of one assisted-creation exchange.
///
/// Exactly one of the parse error or the client failure may be present, and
/// `tasks` is empty whenever either is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// The assistant responded; tasks and any parse error are from the
    /// response content.
    Completed {
        /// Proposed tasks extracted from the response.
        tasks: Vec<ParsedTask>,
        /// Why parsing failed, if it did.
        parse_error: Option<ParseError>,
        /// The raw assistant content, kept for display and debugging.
        raw_response: String,
    },
    /// The client failed before any content was produced.
    ClientFailed(ClientFailure),
}

impl ConversationOutcome {
    /// The proposed tasks, empty on any failure.
    #[must_use]
    pub fn tasks(&self) -> &[ParsedTask] {
        match self {
            Self::Completed { tasks, .. } => tasks,
            Self::ClientFailed(_) => &[],
        }
    }
}

/// The assisted-creation pipeline.
pub struct ConversationPipeline {
    client: Arc<dyn AssistantClient>,
    injector: PromptInjector,
    parser: StructuredResponseParser,
    config: AssistantConfig,
}

impl ConversationPipeline {
    /// Create a pipeline over the given client with default generation
    /// parameters.
    #[must_use]
    pub fn new(client: Arc<dyn AssistantClient>) -> Self {
        Self::with_config(client, AssistantConfig::default())
    }

    /// Create a pipeline with explicit generation parameters.
    #[must_use]
    pub fn with_config(client: Arc<dyn AssistantClient>, config: AssistantConfig) -> Self {
        Self {
            client,
            injector: PromptInjector::new(),
            parser: StructuredResponseParser::new(),
            config,
        }
    }

    /// Handle one piece of user free text.
    ///
    /// Builds the prompt, invokes the assistant, and parses the response.
    /// All failures come back as structured outcome variants; this method
    /// never panics and never touches the store.
    pub async fn handle(&self, user_text: &str, context: &ContextState) -> ConversationOutcome {
        let prompt = self.injector.inject(&TASK_TEMPLATE, context, user_text);

        match self.client.generate(&prompt, &self.config).await {
            Ok(content) => {
                let report = self.parser.parse(&content);
                ConversationOutcome::Completed {
                    tasks: report.tasks,
                    parse_error: report.error,
                    raw_response: content,
                }
            }
            Err(failure) => ConversationOutcome::ClientFailed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::FailureKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Client double that records the prompt and returns a canned result.
    struct ScriptedClient {
        result: Result<String, ClientFailure>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl ScriptedClient {
        fn ok(content: &str) -> Self {
            Self { result: Ok(content.to_string()), seen_prompt: Mutex::new(None) }
        }

        fn failing(kind: FailureKind) -> Self {
            Self {
                result: Err(ClientFailure::new(kind, "scripted failure")),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AssistantClient for ScriptedClient {
        async fn generate(
            &self,
            prompt: &str,
            _config: &AssistantConfig,
        ) -> Result<String, ClientFailure> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            self.result.clone()
        }
    }

    fn context() -> ContextState {
        ContextState {
            active_task_count: 2,
            time_of_day: "evening".to_string(),
            recent_activity: vec![],
        }
    }

    #[tokio::test]
    async fn test_success_parses_tasks() {
        let client = Arc::new(ScriptedClient::ok(
            r#"{"tasks":[{"title":"Finish report","priority":"HIGH"}]}"#,
        ));
        let pipeline = ConversationPipeline::new(client.clone());

        let outcome = pipeline.handle("finish the report", &context()).await;
        match outcome {
            ConversationOutcome::Completed { tasks, parse_error, raw_response } => {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].title, "Finish report");
                assert!(parse_error.is_none());
                assert!(raw_response.contains("Finish report"));
            }
            ConversationOutcome::ClientFailed(f) => panic!("unexpected client failure: {f}"),
        }

        // The prompt carried the injected context and user text.
        let prompt = client.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Active tasks: 2"));
        assert!(prompt.contains("Time of day: evening"));
        assert!(prompt.contains("User says: finish the report"));
    }

    #[tokio::test]
    async fn test_unparseable_response_is_parse_error() {
        let client = Arc::new(ScriptedClient::ok("Sorry, I can't help with that."));
        let pipeline = ConversationPipeline::new(client);

        let outcome = pipeline.handle("anything", &context()).await;
        match outcome {
            ConversationOutcome::Completed { tasks, parse_error, .. } => {
                assert!(tasks.is_empty());
                assert!(!parse_error.unwrap().reason.is_empty());
            }
            ConversationOutcome::ClientFailed(f) => panic!("unexpected client failure: {f}"),
        }
    }

    #[tokio::test]
    async fn test_client_failure_skips_parsing() {
        let client = Arc::new(ScriptedClient::failing(FailureKind::Timeout));
        let pipeline = ConversationPipeline::new(client);

        let outcome = pipeline.handle("anything", &context()).await;
        match outcome {
            ConversationOutcome::ClientFailed(ref failure) => {
                assert_eq!(failure.kind, FailureKind::Timeout);
            }
            ConversationOutcome::Completed { .. } => panic!("expected client failure"),
        }
        assert!(outcome.tasks().is_empty());
    }
}
