use crate::cli::args::{AdapterKind, RunArgs};
use lweval_core::config::EnvConfig;
use lweval_core::providers::llm::dummy::DummyAdapter;
use lweval_core::providers::llm::openai::OpenAiAdapter;
use lweval_core::providers::llm::tracing::TracingAdapter;
use lweval_core::providers::llm::LlmAdapter;
use std::sync::Arc;
use std::time::Duration;

pub const ADAPTER_NAMES: [&str; 2] = ["dummy", "openai"];

/// Build an adapter of `kind`, wrapped for tracing (and the optional timeout).
pub(crate) fn build(kind: AdapterKind, args: &RunArgs, env: &EnvConfig) -> Arc<dyn LlmAdapter> {
    let inner: Arc<dyn LlmAdapter> = match kind {
        AdapterKind::Dummy => Arc::new(DummyAdapter::new(args.seed)),
        AdapterKind::Openai => {
            let model = args
                .model
                .clone()
                .unwrap_or_else(|| env.default_model.clone());
            let api_key = env.openai_api_key.clone().unwrap_or_default();
            Arc::new(OpenAiAdapter::new(model, api_key).with_base_url(env.openai_base_url.clone()))
        }
    };

    let mut traced = TracingAdapter::new(inner);
    if let Some(secs) = args.timeout_secs {
        traced = traced.with_timeout(Duration::from_secs(secs));
    }
    Arc::new(traced)
}
