use std::path::PathBuf;
use thiserror::Error;

/// Configuration-class failures. Generation and judging faults never show up
/// here; they are folded into result data instead.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Unknown eval suite: {name} (available: {})", .available.join(", "))]
    UnknownSuite {
        name: String,
        available: Vec<String>,
    },

    #[error("invalid run config: {0}")]
    InvalidConfig(String),

    #[error("failed to read suite data {}: {source}", .path.display())]
    DataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at {}:{line}: {source}", .path.display())]
    DataParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate item id '{id}' in {}", .path.display())]
    DuplicateItem { path: PathBuf, id: String },

    #[error("failed to write results to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize run result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EvalError {
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        EvalError::InvalidConfig(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_suite_lists_alternatives() {
        let err = EvalError::UnknownSuite {
            name: "bogus".into(),
            available: vec!["harmlessness".into(), "robustness".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown eval suite: bogus"));
        assert!(msg.contains("harmlessness, robustness"));
    }
}
