//! Prompt construction and structured response parsing.

pub mod config;
pub mod injector;
pub mod parser;
pub mod suite;

pub use config::{AssistantConfig, InvalidAssistantConfig};
pub use injector::{ContextState, PromptInjector, PromptTemplate};
pub use parser::{ParseError, ParseReport, ParsedTask, StructuredResponseParser};
pub use suite::{ContentGenerator, IterativeTestingSuite, PromptTestCase, PromptTestResult};
