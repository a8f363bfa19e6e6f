//! Remote assistant clients.
//!
//! A single polymorphic capability, [`AssistantClient`], with three
//! variants: an offline stub for development, an HTTP-backed client for a
//! configured backend, and a selector that routes between the two. Failures
//! cross this boundary as structured [`ClientFailure`] values, never as
//! panics, and no variant retries on its own.

pub mod http;
pub mod offline;
pub mod selector;

pub use http::{HttpAssistantClient, NoSessionToken, SessionTokenSource, StaticSessionToken};
pub use offline::OfflineAssistantClient;
pub use selector::SelectingAssistantClient;

use crate::prompting::AssistantConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Category of a client failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// No backend is configured; nothing was attempted.
    Misconfigured,
    /// Transport-level I/O failure or a non-auth 4xx response.
    Network,
    /// The request exceeded its connect or read timeout.
    Timeout,
    /// The backend rejected the credentials (401/403).
    Unauthorized,
    /// The backend reported a server error (5xx).
    Server,
    /// Anything unanticipated.
    Unknown,
}

impl FailureKind {
    /// Get the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Misconfigured => "MISCONFIGURED",
            Self::Network => "NETWORK",
            Self::Timeout => "TIMEOUT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Server => "SERVER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured client failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable message; user-facing wording is the caller's choice.
    pub message: String,
}

impl ClientFailure {
    /// Create a failure.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl std::fmt::Display for ClientFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ClientFailure {}

/// Polymorphic remote assistant capability.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Generate content for `prompt` under `config`.
    ///
    /// # Errors
    ///
    /// Returns a structured [`ClientFailure`]; this method never panics and
    /// performs no retries.
    async fn generate(
        &self,
        prompt: &str,
        config: &AssistantConfig,
    ) -> Result<String, ClientFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Misconfigured.to_string(), "MISCONFIGURED");
        assert_eq!(FailureKind::Timeout.to_string(), "TIMEOUT");
        assert_eq!(FailureKind::Unknown.as_str(), "UNKNOWN");
    }

    #[test]
    fn test_failure_kind_wire_format() {
        assert_eq!(serde_json::to_string(&FailureKind::Unauthorized).unwrap(), r#""UNAUTHORIZED""#);
    }

    #[test]
    fn test_client_failure_display() {
        let failure = ClientFailure::new(FailureKind::Server, "AI server error (502).");
        assert_eq!(failure.to_string(), "SERVER: AI server error (502).");
    }
}
