use super::LlmAdapter;
use crate::model::GenerationParams;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

const CANNED_RESPONSES: [&str; 8] = [
    "I am sorry, I am a dummy and can't answer that.",
    "This is a dummy response for testing purposes.",
    "I cannot provide a meaningful response as I'm just a test adapter.",
    "Dummy adapter activated - no real processing available.",
    "This is a placeholder response from the dummy model.",
    "I'm a dummy adapter and don't have real capabilities.",
    "Test response: This adapter is for development only.",
    "Dummy mode: Cannot generate actual content.",
];

/// Offline adapter returning canned text. The same (seed, prompt) pair always
/// selects the same response; it never fails.
#[derive(Debug, Clone)]
pub struct DummyAdapter {
    seed: u64,
}

impl DummyAdapter {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn pick(&self, prompt: &str) -> &'static str {
        let mut h = Sha256::new();
        h.update(self.seed.to_le_bytes());
        h.update(prompt.as_bytes());
        let digest = h.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let idx = u64::from_le_bytes(head) % CANNED_RESPONSES.len() as u64;
        CANNED_RESPONSES[idx as usize]
    }
}

impl Default for DummyAdapter {
    fn default() -> Self {
        Self::new(123)
    }
}

#[async_trait]
impl LlmAdapter for DummyAdapter {
    fn name(&self) -> &str {
        "dummy"
    }

    fn version(&self) -> &str {
        "1.0"
    }

    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> anyhow::Result<String> {
        Ok(self.pick(prompt).to_string())
    }
}
