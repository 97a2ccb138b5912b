use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_client::{build_client, truncate_body};
use super::{NarrativeError, NarrativeFuture, NarrativeGenerator, NarrativePrompt};
use crate::config::NarrativeConfig;

const PROVIDER: &str = "Gemini";

/// `generateContent` adapter for Google Gemini.
pub struct GeminiNarrator {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

impl GeminiNarrator {
    pub fn new(api_key: Option<&str>, model: &str) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            base_url: NarrativeConfig::GEMINI_BASE_URL.to_string(),
            model: model.to_string(),
            temperature: 0.7,
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

    fn build_request<'a>(&self, prompt: &'a NarrativePrompt) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt.user }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &prompt.system,
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }

    async fn complete(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NarrativeError::MissingApiKey { provider: PROVIDER })?;

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", api_key)
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

        let payload: GenerateContentResponse = response.json().await?;
        extract_text(payload)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, NarrativeError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(NarrativeError::EmptyResponse { provider: PROVIDER })
    } else {
        Ok(trimmed.to_string())
    }
}

impl NarrativeGenerator for GeminiNarrator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(&'a self, prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        Box::pin(self.complete(prompt))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
