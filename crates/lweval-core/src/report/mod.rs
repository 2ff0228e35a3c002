pub mod console;
pub mod html;
pub mod json;
pub mod markdown;

pub use json::{load_result, write_result};

use crate::model::RunResult;
use std::path::{Path, PathBuf};

/// `report_<suite>_<timestamp>` under `dir`, without extension.
pub fn report_stem(dir: &Path, result: &RunResult) -> PathBuf {
    dir.join(format!(
        "report_{}_{}",
        result.config.eval_suite, result.timestamp
    ))
}

/// Title-cased suite name, e.g. `Harmlessness`.
pub(crate) fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
