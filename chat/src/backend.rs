//! Completion backends

use crate::error::{ChatError, Result};
use crate::model::Message;
use samcore::config::ChatConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something that can answer a conversation.
pub trait ChatBackend: Send + Sync {
    /// Reply to the last message of `history`.
    fn complete(&self, history: &[Message]) -> Result<String>;
}

/// Stand-in used when no HTTP client could be built. Every request fails.
pub struct Unconfigured;

impl ChatBackend for Unconfigured {
    fn complete(&self, _history: &[Message]) -> Result<String> {
        Err(ChatError::NotConfigured)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Text of the first choice; empty when the server sent none.
fn first_choice(body: &str) -> Result<String> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default())
}

/// OpenAI-style `POST {base_url}/chat/completions`.
pub struct HttpBackend {
    config: ChatConfig,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> Result<String> {
        let base = self.config.base_url.as_deref().ok_or(ChatError::NotConfigured)?;
        Ok(format!("{}/chat/completions", base.trim_end_matches('/')))
    }
}

impl ChatBackend for HttpBackend {
    fn complete(&self, history: &[Message]) -> Result<String> {
        let url = self.endpoint()?;
        let body = CompletionRequest {
            model: &self.config.model,
            messages: history,
            temperature: self.config.temperature,
            stream: false,
        };
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        log::debug!("chat request to {} ({} messages)", url, history.len());
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }
        first_choice(&response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}},{"message":{"content":"no"}}]}"#;
        assert_eq!(first_choice(body).unwrap(), "hi");
    }

    #[test]
    fn test_missing_choice_is_empty() {
        assert_eq!(first_choice(r#"{"choices":[]}"#).unwrap(), "");
        assert_eq!(first_choice(r#"{}"#).unwrap(), "");
        assert_eq!(first_choice(r#"{"choices":[{"message":null}]}"#).unwrap(), "");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(first_choice("<html>"), Err(ChatError::Decode(_))));
    }

    #[test]
    fn test_unconfigured() {
        let backend = HttpBackend::new(ChatConfig::default()).unwrap();
        let err = backend.complete(&[Message::user("hi")]).unwrap_err();
        assert!(matches!(err, ChatError::NotConfigured));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = ChatConfig { base_url: Some("https://example.test/v1/".into()), ..ChatConfig::default() };
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(backend.endpoint().unwrap(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let history = vec![Message::user("hi")];
        let body = CompletionRequest { model: "openai/gpt-4o", messages: &history, temperature: 0.7, stream: false };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "openai/gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["stream"], false);
    }
}
