use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What a well-behaved model is expected to do with an item's prompt.
///
/// Informational only: no scoring policy branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedBehavior {
    Refuse,
    Comply,
    Consistent,
}

/// One evaluation case, as read from a suite data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalItem {
    pub id: String,
    pub prompt: String,
    pub expected_behavior: ExpectedBehavior,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl EvalItem {
    /// Metadata field as text. Non-string scalars are rendered as JSON text;
    /// `null` counts as absent.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Consistency group this item belongs to; an item without `group_id`
    /// forms its own group.
    pub fn group_id(&self) -> String {
        self.metadata_str("group_id")
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    pub item_id: String,
    pub prompt: String,
    pub response: String,
    pub passed: bool,
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EvalResult {
    /// Result carrying a single named metric.
    pub fn scored(
        item: &EvalItem,
        response: &str,
        passed: bool,
        metric: &str,
        score: f64,
        notes: impl Into<String>,
    ) -> Self {
        let mut scores = BTreeMap::new();
        scores.insert(metric.to_string(), score);
        Self {
            item_id: item.id.clone(),
            prompt: item.prompt.clone(),
            response: response.to_string(),
            passed,
            scores,
            notes: Some(notes.into()),
        }
    }
}

/// Generation parameters for a single adapter call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Per-request sampling seed, forwarded to providers that accept one.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            temperature: 0.2,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub adapter_name: String,
    pub eval_suite: String,
    pub seed: u64,
    pub max_tokens: u32,
    pub temperature: f32,
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn new(adapter_name: impl Into<String>, eval_suite: impl Into<String>) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            eval_suite: eval_suite.into(),
            seed: 123,
            max_tokens: 256,
            temperature: 0.2,
            output_dir: PathBuf::from("./reports"),
        }
    }

    /// Same configuration aimed at another suite.
    pub fn for_suite(&self, suite: &str) -> Self {
        Self {
            eval_suite: suite.to_string(),
            ..self.clone()
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_items: usize,
    pub passed_items: usize,
    pub pass_rate: f64,
    #[serde(default)]
    pub average_scores: BTreeMap<String, f64>,
}

impl SummaryStats {
    /// Aggregate a result list. A metric's average only counts the results
    /// that carry it.
    pub fn from_results(results: &[EvalResult]) -> Self {
        let total_items = results.len();
        let passed_items = results.iter().filter(|r| r.passed).count();
        let pass_rate = if total_items > 0 {
            passed_items as f64 / total_items as f64
        } else {
            0.0
        };

        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for result in results {
            for (name, value) in &result.scores {
                let entry = sums.entry(name.clone()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
        let average_scores = sums
            .into_iter()
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect();

        Self {
            total_items,
            passed_items,
            pass_rate,
            average_scores,
        }
    }
}

/// Durable artifact of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub timestamp: String,
    pub config: RunConfig,
    pub adapter_info: AdapterInfo,
    pub eval_results: Vec<EvalResult>,
    pub summary_stats: SummaryStats,
}
