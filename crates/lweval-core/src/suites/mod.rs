//! Evaluation suites: a JSON-lines item set plus a per-suite scoring policy.
//!
//! Every suite shares the load / generate / score skeleton in
//! [`EvalSuite::run`]; only consistency replaces it, because it has to see
//! every response in a group before scoring any member.

pub mod consistency;
pub mod harmlessness;
pub mod robustness;

use crate::errors::EvalError;
use crate::model::{EvalItem, EvalResult, GenerationParams};
use crate::providers::llm::{generate_or_placeholder, LlmAdapter};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use consistency::ConsistencySuite;
pub use harmlessness::HarmlessnessSuite;
pub use robustness::RobustnessSuite;

pub const NO_JUDGE_NOTE: &str = "No judge available for scoring";

/// Per-run generation state. The RNG is owned by the run, so repeated or
/// concurrent runs never share random state.
#[derive(Debug, Clone)]
pub struct RunContext {
    params: GenerationParams,
    rng: StdRng,
}

impl RunContext {
    pub fn new(params: GenerationParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Parameters for the next adapter call, with a fresh per-request seed.
    pub fn next_params(&mut self) -> GenerationParams {
        GenerationParams {
            seed: Some(self.rng.gen()),
            ..self.params
        }
    }
}

/// Items backing a suite, read at most once unless reloaded explicitly.
#[derive(Debug, Clone)]
pub struct SuiteData {
    path: PathBuf,
    items: Vec<EvalItem>,
    loaded: bool,
}

impl SuiteData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: Vec::new(),
            loaded: false,
        }
    }

    /// Pre-loaded item set; `path` is informational.
    pub fn from_items(path: impl Into<PathBuf>, items: Vec<EvalItem>) -> Self {
        Self {
            path: path.into(),
            items,
            loaded: true,
        }
    }

    pub fn items(&self) -> &[EvalItem] {
        &self.items
    }

    /// Re-read the data file, replacing any items already held.
    pub fn load_items(&mut self) -> Result<&[EvalItem], EvalError> {
        self.items = read_items(&self.path)?;
        self.loaded = true;
        tracing::debug!(path = %self.path.display(), items = self.items.len(), "suite data loaded");
        Ok(&self.items)
    }

    pub fn ensure_loaded(&mut self) -> Result<(), EvalError> {
        if !self.loaded {
            self.load_items()?;
        }
        Ok(())
    }
}

/// Parse a JSON-lines item file. Blank lines are skipped; ids must be unique.
pub fn read_items(path: &Path) -> Result<Vec<EvalItem>, EvalError> {
    let raw = std::fs::read_to_string(path).map_err(|source| EvalError::DataRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item: EvalItem =
            serde_json::from_str(line).map_err(|source| EvalError::DataParse {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        if !seen.insert(item.id.clone()) {
            return Err(EvalError::DuplicateItem {
                path: path.to_path_buf(),
                id: item.id,
            });
        }
        items.push(item);
    }
    Ok(items)
}

#[async_trait]
pub trait EvalSuite: Send + Sync {
    fn name(&self) -> &'static str;

    fn data(&self) -> &SuiteData;

    fn data_mut(&mut self) -> &mut SuiteData;

    /// Pass/fail policy for one item and its generated response.
    async fn score(&self, item: &EvalItem, response: &str) -> EvalResult;

    /// Generate and score every item, strictly in load order.
    async fn run(
        &mut self,
        adapter: &dyn LlmAdapter,
        ctx: &mut RunContext,
    ) -> Result<Vec<EvalResult>, EvalError> {
        self.data_mut().ensure_loaded()?;

        let mut results = Vec::with_capacity(self.data().items().len());
        for item in self.data().items() {
            let params = ctx.next_params();
            let response = generate_or_placeholder(adapter, &item.prompt, &params).await;
            tracing::debug!(suite = self.name(), item = %item.id, "scoring item");
            results.push(self.score(item, &response).await);
        }
        Ok(results)
    }
}

/// Failing result for a suite that has no judge to grade with.
pub(crate) fn unjudged(item: &EvalItem, response: &str, metric: &str) -> EvalResult {
    EvalResult::scored(item, response, false, metric, 0.0, NO_JUDGE_NOTE)
}
