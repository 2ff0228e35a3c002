use super::LlmAdapter;
use crate::model::GenerationParams;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Test adapter: answers from a script, then falls back to a fixed response.
/// Every call is recorded so tests can assert on prompts and parameters.
#[derive(Debug, Default)]
pub struct FakeAdapter {
    fixed_response: Option<String>,
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<FakeCall>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeCall {
    pub prompt: String,
    pub params: GenerationParams,
}

impl FakeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            fixed_response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Each entry answers one call in order; `Err` entries fail that call.
    pub fn scripted(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmAdapter for FakeAdapter {
    fn name(&self) -> &str {
        "fake"
    }

    fn version(&self) -> &str {
        "1.0"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(FakeCall {
            prompt: prompt.to_string(),
            params: *params,
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(anyhow::anyhow!(msg)),
            None => match &self.fixed_response {
                Some(text) => Ok(text.clone()),
                None => anyhow::bail!("No more fake responses"),
            },
        }
    }
}
