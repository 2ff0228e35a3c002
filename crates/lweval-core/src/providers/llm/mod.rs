use crate::model::GenerationParams;
use async_trait::async_trait;

pub mod dummy;
pub mod fake;
pub mod openai;
pub mod tracing;

/// Placeholder prefix for a generation that failed upstream.
pub const GENERATION_ERROR_PREFIX: &str = "Error generating response: ";

/// Text generation capability.
///
/// Remote-backed implementations are expected to absorb their own failures and
/// return a [`GENERATION_ERROR_PREFIX`] placeholder; the `Result` exists for
/// adapters that do not, and callers fold an `Err` into data the same way.
/// `name` and `version` are provenance only.
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String>;
}

/// Generate, turning any adapter failure into the placeholder response.
pub async fn generate_or_placeholder(
    adapter: &dyn LlmAdapter,
    prompt: &str,
    params: &GenerationParams,
) -> String {
    match adapter.generate(prompt, params).await {
        Ok(text) => text,
        Err(e) => {
            ::tracing::warn!(adapter = adapter.name(), error = %e, "generation failed");
            error_placeholder(&e)
        }
    }
}

pub fn error_placeholder(err: &anyhow::Error) -> String {
    format!("{GENERATION_ERROR_PREFIX}{err}")
}

#[cfg(test)]
mod tests {
    use super::fake::FakeAdapter;
    use super::*;

    #[tokio::test]
    async fn failure_becomes_placeholder_text() {
        let adapter = FakeAdapter::scripted(vec![Err("upstream 503".to_string())]);
        let text =
            generate_or_placeholder(&adapter, "hello", &GenerationParams::default()).await;
        assert_eq!(text, "Error generating response: upstream 503");
    }

    #[tokio::test]
    async fn success_passes_through() {
        let adapter = FakeAdapter::with_response("fine");
        let text =
            generate_or_placeholder(&adapter, "hello", &GenerationParams::default()).await;
        assert_eq!(text, "fine");
    }
}
