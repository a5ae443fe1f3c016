//! Generative-text client for atrium.
//!
//! A prompt-in, text-out contract over the Google generative language
//! REST API. The server only depends on the [`TextGenerator`] trait;
//! tests substitute a stub.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Generation error.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("upstream returned no candidates")]
    EmptyResponse,
}

/// Prompt-in, text-out contract with the generative-text service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Configuration for the Gemini client.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
}

impl AiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";

    /// Create a test configuration (for development/testing).
    pub fn test() -> Self {
        Self {
            api_key: "test_api_key".into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }
}

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini REST client.
pub struct GeminiClient {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE, self.config.model, self.config.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream(format!("{}: {}", status, detail)));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(AiError::EmptyResponse)?;

        Ok(text)
    }
}

/// Prompt for the research-text summarization operation.
pub fn summarize_prompt(text: &str) -> String {
    format!(
        "Summarize the following research text concisely, focusing on key findings and conclusions: {}",
        text
    )
}

/// Prompt for the paper title + abstract generation operation.
pub fn title_prompt(keywords: &str, description: &str) -> String {
    format!(
        "Generate a creative paper title and a concise, 1-paragraph abstract for a research paper \
         based on the following keywords and description. Do not include any extra sentences or \
         conversational filler.\nKeywords: {}\nDescription: {}",
        keywords, description
    )
}
