//! Prompt regression harness.
//!
//! Runs a list of named prompt cases against a content generator and checks
//! each output against the case's expectation. Used to guard the task
//! prompt against regressions when templates or backends change.

use crate::prompting::config::AssistantConfig;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Trait for synchronous content generation in prompt tests.
pub trait ContentGenerator {
    /// Generate content for the given prompt.
    fn generate(&self, prompt: &str, config: &AssistantConfig) -> String;
}

impl<F> ContentGenerator for F
where
    F: Fn(&str, &AssistantConfig) -> String,
{
    fn generate(&self, prompt: &str, config: &AssistantConfig) -> String {
        self(prompt, config)
    }
}

/// One prompt case with its expectation on the output.
pub struct PromptTestCase {
    /// Case name, used in reports.
    pub name: String,
    /// Prompt to send.
    pub prompt: String,
    /// Predicate over the generated output.
    pub expectation: Box<dyn Fn(&str) -> bool>,
}

impl PromptTestCase {
    /// Create a case.
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        expectation: impl Fn(&str) -> bool + 'static,
    ) -> Self {
        Self { name: name.into(), prompt: prompt.into(), expectation: Box::new(expectation) }
    }
}

/// Outcome of one prompt case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTestResult {
    /// Name of the case.
    pub name: String,
    /// Whether the expectation held. A panicking expectation counts as a
    /// failure, not a crash.
    pub passed: bool,
    /// The generated output, kept for inspection.
    pub actual_output: String,
}

/// Runs prompt cases against a generator.
pub struct IterativeTestingSuite<G> {
    generator: G,
}

impl<G: ContentGenerator> IterativeTestingSuite<G> {
    /// Create a suite over the given generator.
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Run all cases and collect their results.
    pub fn run_suite(
        &self,
        cases: &[PromptTestCase],
        config: &AssistantConfig,
    ) -> Vec<PromptTestResult> {
        cases
            .iter()
            .map(|case| {
                let output = self.generator.generate(&case.prompt, config);
                let passed =
                    catch_unwind(AssertUnwindSafe(|| (case.expectation)(&output))).unwrap_or(false);
                PromptTestResult { name: case.name.clone(), passed, actual_output: output }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_generator(prompt: &str, _config: &AssistantConfig) -> String {
        format!("echo: {prompt}")
    }

    #[test]
    fn test_runs_all_cases() {
        let suite = IterativeTestingSuite::new(echo_generator);
        let cases = vec![
            PromptTestCase::new("contains_echo", "hello", |out| out.contains("echo")),
            PromptTestCase::new("exact_match", "hi", |out| out == "echo: hi"),
            PromptTestCase::new("fails", "x", |out| out.is_empty()),
        ];

        let results = suite.run_suite(&cases, &AssistantConfig::default());
        assert_eq!(results.len(), 3);
        assert!(results[0].passed);
        assert!(results[1].passed);
        assert!(!results[2].passed);
        assert_eq!(results[2].actual_output, "echo: x");
    }

    #[test]
    fn test_panicking_expectation_is_a_failure() {
        let suite = IterativeTestingSuite::new(echo_generator);
        let cases =
            vec![PromptTestCase::new("panics", "boom", |_out| panic!("expectation blew up"))];

        let results = suite.run_suite(&cases, &AssistantConfig::default());
        assert!(!results[0].passed);
    }
}
