use super::{LlmAdapter, GENERATION_ERROR_PREFIX};
use crate::model::GenerationParams;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info_span, Instrument};

/// Decorator that records every generation in an `lweval.generate` span and
/// can bound each call with a timeout. Identity is the inner adapter's.
pub struct TracingAdapter {
    inner: Arc<dyn LlmAdapter>,
    timeout: Option<Duration>,
}

impl TracingAdapter {
    pub fn new(inner: Arc<dyn LlmAdapter>) -> Self {
        Self {
            inner,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl LlmAdapter for TracingAdapter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> &str {
        self.inner.version()
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String> {
        let span = info_span!(
            "lweval.generate",
            "lweval.adapter" = self.inner.name(),
            "lweval.max_tokens" = params.max_tokens,
            "lweval.temperature" = params.temperature as f64,
            "lweval.prompt_chars" = prompt.chars().count(),
            "lweval.response_chars" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let call = self.inner.generate(prompt, params);
            let result = match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(res) => res,
                    Err(_) => Err(anyhow::anyhow!(
                        "generation timed out after {}ms",
                        limit.as_millis()
                    )),
                },
                None => call.await,
            };

            let span = tracing::Span::current();
            if let Ok(text) = &result {
                span.record("lweval.response_chars", text.chars().count());
            }
            if let Some(message) = failure_message(&result) {
                span.record("error", true);
                span.record("error.message", message.as_str());
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Failure to record on the span. Adapters that absorb upstream faults hand
/// back the placeholder text as `Ok`, which counts as a failure too.
fn failure_message(result: &anyhow::Result<String>) -> Option<String> {
    match result {
        Ok(text) => text
            .strip_prefix(GENERATION_ERROR_PREFIX)
            .map(str::to_string),
        Err(e) => Some(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeAdapter;

    struct SlowAdapter;

    #[async_trait]
    impl LlmAdapter for SlowAdapter {
        fn name(&self) -> &str {
            "slow"
        }
        fn version(&self) -> &str {
            "0.1"
        }
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".into())
        }
    }

    #[tokio::test]
    async fn delegates_identity_and_output() {
        let inner = Arc::new(FakeAdapter::with_response("hello"));
        let adapter = TracingAdapter::new(inner.clone());
        assert_eq!(adapter.name(), "fake");
        assert_eq!(adapter.version(), "1.0");
        let out = adapter
            .generate("p", &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(out, "hello");
        assert_eq!(inner.call_count(), 1);
    }

    #[tokio::test]
    async fn timeout_surfaces_as_error() {
        let adapter =
            TracingAdapter::new(Arc::new(SlowAdapter)).with_timeout(Duration::from_millis(10));
        let err = adapter
            .generate("p", &GenerationParams::default())
            .await
            .expect_err("slow adapter should time out");
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn absorbed_placeholder_counts_as_failure() {
        let absorbed: anyhow::Result<String> =
            Ok("Error generating response: HTTP 503".to_string());
        assert_eq!(failure_message(&absorbed).as_deref(), Some("HTTP 503"));

        let raised: anyhow::Result<String> = Err(anyhow::anyhow!("connection reset"));
        assert_eq!(failure_message(&raised).as_deref(), Some("connection reset"));

        let fine: anyhow::Result<String> = Ok("Paris".to_string());
        assert_eq!(failure_message(&fine), None);
    }

    #[tokio::test]
    async fn absorbed_placeholder_passes_through_unchanged() {
        let inner = Arc::new(FakeAdapter::with_response("Error generating response: boom"));
        let out = TracingAdapter::new(inner)
            .generate("p", &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(out, "Error generating response: boom");
    }
}
