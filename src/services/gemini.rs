use crate::config::GeneratorSettings;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Shown when the API answers but produces no text
pub const GENERIC_MATCH_MESSAGE: &str = "新しいマッチングがあります！";

/// Congratulation used whenever generation fails
pub fn fallback_message(name: &str) -> String {
    format!("{}さんとマッチしました！", name)
}

/// Produces the congratulation shown in the match dialog
///
/// Implementations must never fail: any internal error is replaced by
/// [`fallback_message`].
pub trait MatchMessageGenerator: Send + Sync + 'static {
    fn generate_match_message(&self, name: &str) -> impl Future<Output = String> + Send;
}

/// Errors that can occur when calling the generative text API
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            temperature,
            client,
        })
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self, GeminiError> {
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
            settings.temperature,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn prompt(name: &str) -> String {
        format!(
            "{}さんとマッチしました！相手が喜ぶような、明るくて少しワクワクするマッチングお祝いメッセージを日本語で1つ生成してください。最大20文字以内。",
            name
        )
    }

    /// Ask the model for a congratulation, surfacing every failure
    pub async fn request_message(&self, name: &str) -> Result<String, GeminiError> {
        if self.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let payload = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(name) }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        tracing::debug!("Requesting match message for {} from {}", name, url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeminiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(GeminiError::ApiError(format!("{} - {}", status, body)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?;

        Ok(extract_text(&json))
    }
}

/// Concatenated text of the first candidate, trimmed
fn extract_text(json: &Value) -> String {
    json.get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl MatchMessageGenerator for GeminiClient {
    async fn generate_match_message(&self, name: &str) -> String {
        match self.request_message(name).await {
            Ok(text) if text.is_empty() => GENERIC_MATCH_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Match message generation failed for {}: {}", name, e);
                fallback_message(name)
            }
        }
    }
}
