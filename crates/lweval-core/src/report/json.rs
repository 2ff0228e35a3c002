use crate::errors::EvalError;
use crate::model::RunResult;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub fn run_file_name(result: &RunResult) -> String {
    format!("run_{}_{}.json", result.timestamp, result.run_id)
}

pub fn write_result(result: &RunResult, out: &Path) -> Result<(), EvalError> {
    let body = serde_json::to_string_pretty(result)?;
    std::fs::write(out, body).map_err(|source| EvalError::Persist {
        path: out.to_path_buf(),
        source,
    })
}

/// Persist under `config.output_dir`, creating it if needed.
pub fn save_run(result: &RunResult) -> Result<PathBuf, EvalError> {
    let dir = &result.config.output_dir;
    std::fs::create_dir_all(dir).map_err(|source| EvalError::Persist {
        path: dir.clone(),
        source,
    })?;
    let path = dir.join(run_file_name(result));
    write_result(result, &path)?;
    tracing::info!(path = %path.display(), run_id = %result.run_id, "saved run results");
    Ok(path)
}

pub fn load_result(path: &Path) -> anyhow::Result<RunResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse run result {}", path.display()))
}
