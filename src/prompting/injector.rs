//! Prompt template substitution.
//!
//! Deliberately permissive: placeholders are replaced literally, unknown
//! template variables pass through unchanged, and placeholders missing from
//! the template simply do not appear in the output. Template evolution must
//! never break older call sites, so nothing here is an error.

use serde::{Deserialize, Serialize};

/// A prompt template with its system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Stable template identifier.
    pub id: String,
    /// System instruction sent alongside the rendered prompt.
    pub system_instruction: String,
    /// Template body with `{placeholder}` tokens.
    pub prompt_structure: String,
}

/// Ambient context injected into prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextState {
    /// Number of currently active (incomplete) tasks.
    pub active_task_count: usize,
    /// Human-readable time of day (e.g. "morning").
    pub time_of_day: String,
    /// Recent user activity descriptions.
    #[serde(default)]
    pub recent_activity: Vec<String>,
}

/// Placeholder token for the active task count.
pub const TOKEN_ACTIVE_TASK_COUNT: &str = "{activeTaskCount}";
/// Placeholder token for the time of day.
pub const TOKEN_TIME_OF_DAY: &str = "{timeOfDay}";
/// Placeholder token for the user's free text.
pub const TOKEN_USER_INPUT: &str = "{userInput}";

/// Pure template substitution; no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptInjector;

impl PromptInjector {
    /// Create an injector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render `template` by literally substituting the known placeholder
    /// tokens from `context` and `user_text`.
    #[must_use]
    pub fn inject(&self, template: &PromptTemplate, context: &ContextState, user_text: &str) -> String {
        template
            .prompt_structure
            .replace(TOKEN_ACTIVE_TASK_COUNT, &context.active_task_count.to_string())
            .replace(TOKEN_TIME_OF_DAY, &context.time_of_day)
            .replace(TOKEN_USER_INPUT, user_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(body: &str) -> PromptTemplate {
        PromptTemplate {
            id: "test_v1".to_string(),
            system_instruction: "Be terse.".to_string(),
            prompt_structure: body.to_string(),
        }
    }

    fn context() -> ContextState {
        ContextState {
            active_task_count: 3,
            time_of_day: "morning".to_string(),
            recent_activity: vec![],
        }
    }

    #[test]
    fn test_substitutes_all_tokens() {
        let injector = PromptInjector::new();
        let out = injector.inject(
            &template("Tasks: {activeTaskCount}. Time: {timeOfDay}. User says: {userInput}"),
            &context(),
            "buy milk",
        );
        assert_eq!(out, "Tasks: 3. Time: morning. User says: buy milk");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let injector = PromptInjector::new();
        let out = injector.inject(&template("{mood} and {userInput}"), &context(), "hi");
        assert_eq!(out, "{mood} and hi");
    }

    #[test]
    fn test_absent_tokens_are_simply_absent() {
        let injector = PromptInjector::new();
        let out = injector.inject(&template("no placeholders here"), &context(), "ignored");
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn test_repeated_tokens_all_replaced() {
        let injector = PromptInjector::new();
        let out = injector.inject(&template("{userInput} {userInput}"), &context(), "x");
        assert_eq!(out, "x x");
    }
}
