use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_client::{build_client, truncate_body};
use super::{NarrativeError, NarrativeFuture, NarrativeGenerator, NarrativePrompt};
use crate::config::NarrativeConfig;

const PROVIDER: &str = "OpenAI";

/// Chat-completions adapter for OpenAI-compatible endpoints.
pub struct OpenAiNarrator {
    /// Pre-computed `"Bearer <key>"` header value.
    auth_header: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    client: Client,
}

impl OpenAiNarrator {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self {
            auth_header: api_key.map(|key| format!("Bearer {key}")),
            base_url: NarrativeConfig::OPENAI_BASE_URL.to_string(),
            model: model.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            client: build_client(Duration::from_millis(NarrativeConfig::DEFAULT_TIMEOUT_MS)),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    fn build_request<'a>(&'a self, prompt: &'a NarrativePrompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    async fn complete(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        let auth_header = self
            .auth_header
            .as_ref()
            .ok_or(NarrativeError::MissingApiKey { provider: PROVIDER })?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", auth_header)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        extract_text(chat_response)
    }
}

fn extract_text(response: ChatResponse) -> Result<String, NarrativeError> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .ok_or(NarrativeError::EmptyResponse { provider: PROVIDER })
}

impl NarrativeGenerator for OpenAiNarrator {
    fn name(&self) -> &str {
        "openai"
    }

    fn generate<'a>(&'a self, prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        Box::pin(self.complete(prompt))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
