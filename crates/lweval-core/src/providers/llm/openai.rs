use super::{error_placeholder, LlmAdapter};
use crate::model::GenerationParams;
use async_trait::async_trait;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat-completions adapter. Upstream failures never escape
/// `generate`; they come back as placeholder text.
pub struct OpenAiAdapter {
    pub model: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiAdapter {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body(&self, prompt: &str, params: &GenerationParams) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });
        if let Some(seed) = params.seed {
            body["seed"] = json!(seed);
        }
        body
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt, params))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI chat API error (status {}): {}", status, error_text);
        }

        let body: serde_json::Value = resp.json().await?;
        extract_content(&body)
    }
}

/// `choices[0].message.content`; a `null` content is an empty answer.
fn extract_content(body: &serde_json::Value) -> anyhow::Result<String> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| anyhow::anyhow!("OpenAI API response missing choices"))?;
    Ok(message
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string())
}

#[async_trait]
impl LlmAdapter for OpenAiAdapter {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> &str {
        "1.0"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String> {
        match self.complete(prompt, params).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "openai generation failed");
                Ok(error_placeholder(&e))
            }
        }
    }
}
