//! HTTP-backed assistant client.
//!
//! Issues one POST per call against the configured backend with bounded
//! connect and read timeouts, maps HTTP and transport outcomes onto the
//! failure taxonomy, and extracts the generated content from whichever of
//! the known response shapes the backend speaks.

use crate::assistant::{AssistantClient, ClientFailure, FailureKind};
use crate::prompting::AssistantConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Connect timeout for backend requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Overall request timeout (covers reading the response).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Supplies the optional bearer token for backend requests.
///
/// A collaborator seam: session management is outside this crate, the
/// client only passes the token along.
pub trait SessionTokenSource: Send + Sync {
    /// Current session token, or `None` when unauthenticated.
    fn session_token(&self) -> Option<String>;
}

/// Token source that never supplies a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSessionToken;

impl SessionTokenSource for NoSessionToken {
    fn session_token(&self) -> Option<String> {
        None
    }
}

/// Token source returning a fixed token.
#[derive(Debug, Clone)]
pub struct StaticSessionToken(pub String);

impl SessionTokenSource for StaticSessionToken {
    fn session_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Request body for the backend protocol.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    input: &'a str,
    temperature: f32,
    max_tokens: u32,
    system_instruction: &'a str,
}

/// HTTP-backed variant of [`AssistantClient`].
pub struct HttpAssistantClient {
    backend_url: String,
    token_source: Arc<dyn SessionTokenSource>,
    http: reqwest::Client,
}

impl std::fmt::Debug for HttpAssistantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAssistantClient")
            .field("backend_url", &self.backend_url)
            .finish_non_exhaustive()
    }
}

impl HttpAssistantClient {
    /// Create a client for the given backend URL with no session token.
    ///
    /// An empty URL is allowed here; calls will fail with
    /// [`FailureKind::Misconfigured`] without touching the network.
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_token_source(backend_url, Arc::new(NoSessionToken))
    }

    /// Create a client with a session token source.
    #[must_use]
    pub fn with_token_source(
        backend_url: impl Into<String>,
        token_source: Arc<dyn SessionTokenSource>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { backend_url: backend_url.into(), token_source, http }
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &AssistantConfig,
    ) -> Result<String, ClientFailure> {
        if self.backend_url.trim().is_empty() {
            return Err(ClientFailure::new(
                FailureKind::Misconfigured,
                "AI backend is not configured. Set backend_url.",
            ));
        }

        let body = GenerateRequest {
            input: prompt,
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            system_instruction: config.system_instruction(),
        };

        let mut request = self.http.post(&self.backend_url).json(&body);
        if let Some(token) = self.token_source.session_token() {
            if !token.trim().is_empty() {
                request = request.bearer_auth(token);
            }
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        match status {
            401 | 403 => {
                Err(ClientFailure::new(FailureKind::Unauthorized, "AI authorization failed."))
            }
            500.. => Err(ClientFailure::new(
                FailureKind::Server,
                format!("AI server error ({status})."),
            )),
            400.. => Err(ClientFailure::new(
                FailureKind::Network,
                format!("AI request failed ({status})."),
            )),
            _ => Ok(extract_content(&text)),
        }
    }
}

/// Map a reqwest transport error onto the failure taxonomy.
fn map_transport_error(e: reqwest::Error) -> ClientFailure {
    if e.is_timeout() {
        ClientFailure::new(FailureKind::Timeout, "AI request timed out.")
    } else if e.is_connect() || e.is_request() || e.is_body() || e.is_decode() {
        ClientFailure::new(FailureKind::Network, "Could not reach AI backend.")
    } else {
        ClientFailure::new(FailureKind::Unknown, "Unexpected AI client error.")
    }
}

/// Pull the generated text out of a backend response body.
///
/// Probes `content`, then `output`, then the chat-completions shape
/// `choices[0].message.content`; a body matching none of these is assumed
/// to already be the content.
fn extract_content(body: &str) -> String {
    if body.trim().is_empty() {
        return body.to_string();
    }

    let Ok(root) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    root.get("content")
        .and_then(serde_json::Value::as_str)
        .or_else(|| root.get("output").and_then(serde_json::Value::as_str))
        .or_else(|| {
            root.get("choices")?
                .get(0)?
                .get("message")?
                .get("content")?
                .as_str()
        })
        .map_or_else(|| body.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_field() {
        assert_eq!(extract_content(r#"{"content":"hello"}"#), "hello");
    }

    #[test]
    fn test_extract_output_field() {
        assert_eq!(extract_content(r#"{"output":"from output"}"#), "from output");
    }

    #[test]
    fn test_extract_chat_choices() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"from chat"}}]}"#;
        assert_eq!(extract_content(body), "from chat");
    }

    #[test]
    fn test_content_wins_over_output() {
        assert_eq!(extract_content(r#"{"content":"a","output":"b"}"#), "a");
    }

    #[test]
    fn test_unrecognized_json_returned_raw() {
        let body = r#"{"data":"something else"}"#;
        assert_eq!(extract_content(body), body);
    }

    #[test]
    fn test_non_json_body_returned_raw() {
        assert_eq!(extract_content("plain text response"), "plain text response");
        assert_eq!(extract_content(""), "");
    }

    #[tokio::test]
    async fn test_blank_url_is_misconfigured_without_network() {
        let client = HttpAssistantClient::new("");
        let err =
            client.generate("prompt", &AssistantConfig::default()).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Misconfigured);

        let client = HttpAssistantClient::new("   ");
        let err =
            client.generate("prompt", &AssistantConfig::default()).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Misconfigured);
    }

    #[test]
    fn test_request_body_wire_names() {
        let body = GenerateRequest {
            input: "p",
            temperature: 0.7,
            max_tokens: 256,
            system_instruction: "s",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input"], "p");
        assert_eq!(json["maxTokens"], 256);
        assert_eq!(json["systemInstruction"], "s");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
}
