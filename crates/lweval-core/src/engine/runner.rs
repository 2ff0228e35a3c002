use crate::config::bundled_data_dir;
use crate::errors::EvalError;
use crate::fingerprint::{file_sha, RunIdentity, CODE_VERSION};
use crate::judge::LlmJudge;
use crate::model::{AdapterInfo, RunConfig, RunResult, SummaryStats};
use crate::providers::llm::LlmAdapter;
use crate::suites::{
    consistency, harmlessness, robustness, ConsistencySuite, EvalSuite, HarmlessnessSuite,
    RobustnessSuite, RunContext,
};
use std::path::PathBuf;
use std::sync::Arc;

pub const DATA_FILE_EXTENSION: &str = "jsonl";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

type SuiteCtor = fn(PathBuf, Option<LlmJudge>) -> Box<dyn EvalSuite>;

fn harmlessness_suite(path: PathBuf, judge: Option<LlmJudge>) -> Box<dyn EvalSuite> {
    Box::new(HarmlessnessSuite::new(path, judge))
}

fn robustness_suite(path: PathBuf, judge: Option<LlmJudge>) -> Box<dyn EvalSuite> {
    Box::new(RobustnessSuite::new(path, judge))
}

fn consistency_suite(path: PathBuf, judge: Option<LlmJudge>) -> Box<dyn EvalSuite> {
    Box::new(ConsistencySuite::new(path, judge))
}

/// Registered suites, in listing order.
const REGISTRY: &[(&str, SuiteCtor)] = &[
    (harmlessness::SUITE_NAME, harmlessness_suite),
    (robustness::SUITE_NAME, robustness_suite),
    (consistency::SUITE_NAME, consistency_suite),
];

pub fn format_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Drives suites against an adapter. Reusable across sequential runs; every
/// run builds a fresh suite instance.
#[derive(Debug, Clone)]
pub struct EvalRunner {
    data_dir: PathBuf,
}

impl Default for EvalRunner {
    fn default() -> Self {
        Self::new(bundled_data_dir())
    }
}

impl EvalRunner {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn list_suites() -> Vec<&'static str> {
        REGISTRY.iter().map(|(name, _)| *name).collect()
    }

    pub fn is_registered(suite_name: &str) -> bool {
        REGISTRY.iter().any(|(name, _)| *name == suite_name)
    }

    /// `<data_dir>/<suite>.jsonl`
    pub fn data_path(&self, suite_name: &str) -> PathBuf {
        self.data_dir
            .join(format!("{suite_name}.{DATA_FILE_EXTENSION}"))
    }

    fn resolve(suite_name: &str) -> Result<SuiteCtor, EvalError> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == suite_name)
            .map(|(_, ctor)| *ctor)
            .ok_or_else(|| EvalError::UnknownSuite {
                name: suite_name.to_string(),
                available: Self::list_suites().into_iter().map(String::from).collect(),
            })
    }

    pub async fn run_eval(
        &self,
        adapter: &dyn LlmAdapter,
        suite_name: &str,
        config: &RunConfig,
        judge_adapter: Option<Arc<dyn LlmAdapter>>,
    ) -> Result<RunResult, EvalError> {
        let timestamp = format_timestamp();
        self.run_eval_at(adapter, suite_name, config, judge_adapter, timestamp)
            .await
    }

    /// `run_eval` with an explicit timestamp, which feeds the run id.
    pub async fn run_eval_at(
        &self,
        adapter: &dyn LlmAdapter,
        suite_name: &str,
        config: &RunConfig,
        judge_adapter: Option<Arc<dyn LlmAdapter>>,
        timestamp: String,
    ) -> Result<RunResult, EvalError> {
        config.validate()?;
        let mut ctx = RunContext::new(config.generation_params(), config.seed);
        let ctor = Self::resolve(suite_name)?;

        let judge = judge_adapter.map(LlmJudge::new);
        if judge.is_none() {
            tracing::warn!(suite = suite_name, "no judge adapter; results will not be graded");
        }

        let data_path = self.data_path(suite_name);
        let data_sha = file_sha(&data_path).map_err(|source| EvalError::DataRead {
            path: data_path.clone(),
            source,
        })?;
        let run_id = RunIdentity {
            adapter_name: adapter.name(),
            adapter_version: adapter.version(),
            suite: suite_name,
            data_sha: &data_sha,
            code_version: CODE_VERSION,
            timestamp: &timestamp,
        }
        .run_id();

        tracing::info!(run_id = %run_id, suite = suite_name, adapter = adapter.name(), "starting run");

        let mut suite = ctor(data_path, judge);
        let eval_results = suite.run(adapter, &mut ctx).await?;
        let summary_stats = SummaryStats::from_results(&eval_results);

        tracing::info!(
            run_id = %run_id,
            suite = suite_name,
            total = summary_stats.total_items,
            passed = summary_stats.passed_items,
            pass_rate = summary_stats.pass_rate,
            "run finished"
        );

        Ok(RunResult {
            run_id,
            timestamp,
            config: config.clone(),
            adapter_info: AdapterInfo {
                name: adapter.name().to_string(),
                version: adapter.version().to_string(),
            },
            eval_results,
            summary_stats,
        })
    }

    /// Runs each suite in turn with the config retargeted at it. The first
    /// configuration error stops the sequence.
    pub async fn run_multiple_suites(
        &self,
        adapter: &dyn LlmAdapter,
        suite_names: &[&str],
        config: &RunConfig,
        judge_adapter: Option<Arc<dyn LlmAdapter>>,
    ) -> Result<Vec<RunResult>, EvalError> {
        let mut results = Vec::with_capacity(suite_names.len());
        for suite_name in suite_names {
            let suite_config = config.for_suite(suite_name);
            let result = self
                .run_eval(adapter, suite_name, &suite_config, judge_adapter.clone())
                .await?;
            results.push(result);
        }
        Ok(results)
    }

    /// Write `run_<timestamp>_<run_id>.json` under the configured output dir.
    pub fn save_results(&self, result: &RunResult) -> Result<PathBuf, EvalError> {
        crate::report::json::save_run(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeAdapter;
    use std::io::Write;

    fn data_dir_with(suite: &str, lines: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join(format!("{suite}.jsonl"))).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        dir
    }

    #[test]
    fn lists_the_three_suites_in_order() {
        assert_eq!(
            EvalRunner::list_suites(),
            vec!["harmlessness", "robustness", "consistency"]
        );
        assert!(EvalRunner::is_registered("consistency"));
        assert!(!EvalRunner::is_registered("toxicity"));
    }

    #[test]
    fn data_path_follows_naming_convention() {
        let runner = EvalRunner::new("/data/root");
        assert_eq!(
            runner.data_path("robustness"),
            PathBuf::from("/data/root/robustness.jsonl")
        );
    }

    #[tokio::test]
    async fn unknown_suite_is_rejected_before_any_generation() {
        let runner = EvalRunner::new("/nonexistent");
        let adapter = FakeAdapter::with_response("x");
        let err = runner
            .run_eval(&adapter, "toxicity", &RunConfig::new("fake", "toxicity"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::UnknownSuite { ref name, .. } if name == "toxicity"));
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_parameters_are_rejected() {
        let dir = data_dir_with(
            "harmlessness",
            &[r#"{"id":"h1","prompt":"p","expected_behavior":"refuse"}"#],
        );
        let runner = EvalRunner::new(dir.path());
        let adapter = FakeAdapter::with_response("x");
        let mut cfg = RunConfig::new("fake", "harmlessness");
        cfg.temperature = 9.0;
        let err = runner
            .run_eval(&adapter, "harmlessness", &cfg, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::InvalidConfig(_)));
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_data_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = EvalRunner::new(dir.path());
        let adapter = FakeAdapter::with_response("x");
        let err = runner
            .run_eval(&adapter, "robustness", &RunConfig::new("fake", "robustness"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::DataRead { .. }));
    }

    #[tokio::test]
    async fn run_result_carries_identity_and_stats() {
        let dir = data_dir_with(
            "harmlessness",
            &[
                r#"{"id":"h1","prompt":"p1","expected_behavior":"refuse"}"#,
                r#"{"id":"h2","prompt":"p2","expected_behavior":"refuse"}"#,
            ],
        );
        let runner = EvalRunner::new(dir.path());
        let adapter = FakeAdapter::with_response("I can't help with that.");
        let cfg = RunConfig::new("fake", "harmlessness");

        let result = runner
            .run_eval_at(&adapter, "harmlessness", &cfg, None, "20240101_120000".into())
            .await
            .unwrap();

        assert_eq!(result.timestamp, "20240101_120000");
        assert_eq!(result.run_id.len(), 8);
        assert_eq!(result.adapter_info.name, "fake");
        assert_eq!(result.adapter_info.version, "1.0");
        assert_eq!(result.config, cfg);
        assert_eq!(result.eval_results.len(), 2);
        assert_eq!(result.summary_stats.total_items, 2);
        assert_eq!(result.summary_stats.passed_items, 0);
        assert_eq!(result.summary_stats.pass_rate, 0.0);
        assert_eq!(result.summary_stats.average_scores["refusal_score"], 0.0);

        let again = runner
            .run_eval_at(&adapter, "harmlessness", &cfg, None, "20240101_120000".into())
            .await
            .unwrap();
        assert_eq!(again.run_id, result.run_id);

        let later = runner
            .run_eval_at(&adapter, "harmlessness", &cfg, None, "20240101_120001".into())
            .await
            .unwrap();
        assert_ne!(later.run_id, result.run_id);
    }

    #[tokio::test]
    async fn same_seed_gives_same_request_seeds() {
        let dir = data_dir_with(
            "robustness",
            &[
                r#"{"id":"r1","prompt":"a","expected_behavior":"comply"}"#,
                r#"{"id":"r2","prompt":"b","expected_behavior":"comply"}"#,
            ],
        );
        let runner = EvalRunner::new(dir.path());
        let cfg = RunConfig::new("fake", "robustness");

        let first = FakeAdapter::with_response("ok");
        runner.run_eval(&first, "robustness", &cfg, None).await.unwrap();
        let second = FakeAdapter::with_response("ok");
        runner.run_eval(&second, "robustness", &cfg, None).await.unwrap();

        let seeds = |a: &FakeAdapter| a.calls().iter().map(|c| c.params.seed).collect::<Vec<_>>();
        assert_eq!(seeds(&first), seeds(&second));
        assert!(first.calls().iter().all(|c| c.params.max_tokens == 256));
    }
}
