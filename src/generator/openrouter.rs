//! OpenRouter chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{DocumentGenerator, DocumentKind};
use crate::errors::GenerateError;
use crate::flo_config::GeneratorSection;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends one POST per document; no retries and no streaming.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    settings: GeneratorSection,
    token: String,
    model: String,
}

impl OpenRouterClient {
    /// Client with default endpoint, limits and headers.
    pub fn new(token: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerateError> {
        Self::from_settings(&GeneratorSection::default(), token, model)
    }

    pub fn from_settings(
        settings: &GeneratorSection,
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GenerateError::MissingToken);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(GenerateError::Http)?;
        Ok(Self {
            http,
            settings: settings.clone(),
            token,
            model: model.into(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.settings.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl DocumentGenerator for OpenRouterClient {
    async fn generate(&self, idea: &str, kind: DocumentKind) -> Result<String, GenerateError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: kind.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: idea,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        tracing::info!("Generating {} document with model {}", kind, self.model);

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.token)
            .header("HTTP-Referer", &self.settings.referer)
            .header("X-Title", &self.settings.title)
            .json(&body)
            .send()
            .await
            .map_err(GenerateError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(GenerateError::Http)?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| GenerateError::Malformed(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::EmptyContent);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const PATH: &str = "/api/v1/chat/completions";

    async fn client_for(server: &mockito::ServerGuard) -> OpenRouterClient {
        OpenRouterClient::new("test-token", "test/model")
            .unwrap()
            .with_endpoint(format!("{}{}", server.url(), PATH))
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("authorization", "Bearer test-token")
            .match_header("http-referer", "https://example.com/")
            .match_header("x-title", "FlowProjectPlanner")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({
                    "model": "test/model",
                    "max_tokens": 1024
                })),
                Matcher::Regex(r#""role":"user","content":"todo app""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"  # Plan\n\n- one  "}}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server).await;
        let text = client
            .generate("todo app", DocumentKind::Testing)
            .await
            .unwrap();

        assert_eq!(text, "# Plan\n\n- one");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(401)
            .with_body("invalid key")
            .create_async()
            .await;

        let err = client_for(&server)
            .await
            .generate("x", DocumentKind::Concept)
            .await
            .unwrap_err();
        match err {
            GenerateError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid key");
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"   "}}]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .await
            .generate("x", DocumentKind::Concept)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent));
    }

    #[tokio::test]
    async fn test_missing_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"id":"gen-1"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .await
            .generate("x", DocumentKind::Design)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .await
            .generate("x", DocumentKind::Design)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        let client = OpenRouterClient::new("t", "m")
            .unwrap()
            .with_endpoint("http://127.0.0.1:1/api/v1/chat/completions");
        let err = client
            .generate("x", DocumentKind::Concept)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Http(_)));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = OpenRouterClient::new("  ", "m").unwrap_err();
        assert!(matches!(err, GenerateError::MissingToken));
    }
}
