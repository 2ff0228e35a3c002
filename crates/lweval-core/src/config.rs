//! Environment configuration: `.env` loading plus `LWEVAL_*` variables.

use crate::errors::EvalError;
use crate::model::RunConfig;
use crate::providers::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_DEFAULT_MODEL: &str = "LWEVAL_DEFAULT_MODEL";
pub const ENV_MAX_TOKENS: &str = "LWEVAL_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "LWEVAL_TEMPERATURE";
pub const ENV_BASE_URL: &str = "LWEVAL_OPENAI_BASE_URL";
pub const ENV_DATA_DIR: &str = "LWEVAL_DATA_DIR";

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Suite data shipped with the crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub openai_api_key: Option<String>,
    pub default_model: String,
    /// Raw value, kept unparsed so `validate` can report it.
    max_tokens_raw: Option<String>,
    temperature_raw: Option<String>,
    pub openai_base_url: String,
    pub data_dir: PathBuf,
}

impl EnvConfig {
    /// Load `env_file` (or `./.env`) into the process environment, then read
    /// the configuration. A missing `.env` file is not an error.
    pub fn load(env_file: Option<&Path>) -> Self {
        let loaded = match env_file {
            Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };
        match loaded {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "failed to load env file"),
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: non_empty(ENV_API_KEY),
            default_model: non_empty(ENV_DEFAULT_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens_raw: non_empty(ENV_MAX_TOKENS),
            temperature_raw: non_empty(ENV_TEMPERATURE),
            openai_base_url: non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            data_dir: non_empty(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(bundled_data_dir),
        }
    }

    fn parsed_max_tokens(&self) -> Result<i64, String> {
        match &self.max_tokens_raw {
            None => Ok(256),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("{ENV_MAX_TOKENS} must be an integer, got {raw}")),
        }
    }

    fn parsed_temperature(&self) -> Result<f32, String> {
        match &self.temperature_raw {
            None => Ok(0.2),
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .map_err(|_| format!("{ENV_TEMPERATURE} must be a number, got {raw}")),
        }
    }

    /// Default max tokens; falls back to 256 when the variable is unusable.
    pub fn max_tokens(&self) -> u32 {
        self.parsed_max_tokens()
            .ok()
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(256)
    }

    /// Default temperature; falls back to 0.2 when the variable is unusable.
    pub fn temperature(&self) -> f32 {
        self.parsed_temperature()
            .ok()
            .filter(|t| (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(t))
            .unwrap_or(0.2)
    }

    /// Problems that block talking to the OpenAI API. Empty means usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.openai_api_key.is_none() {
            errors.push(format!("{ENV_API_KEY} not found in environment"));
        }

        match self.parsed_max_tokens() {
            Ok(v) if v <= 0 => errors.push(format!("{ENV_MAX_TOKENS} must be positive, got {v}")),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }

        match self.parsed_temperature() {
            Ok(t) if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) => errors.push(format!(
                "{ENV_TEMPERATURE} must be between {MIN_TEMPERATURE:.1} and {MAX_TEMPERATURE:.1}, got {t}"
            )),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }

        errors
    }
}

impl RunConfig {
    /// Range checks applied before any item is processed.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.max_tokens == 0 {
            return Err(EvalError::invalid_config("max_tokens must be positive"));
        }
        if !self.temperature.is_finite()
            || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature)
        {
            return Err(EvalError::invalid_config(format!(
                "temperature must be between {MIN_TEMPERATURE:.1} and {MAX_TEMPERATURE:.1}, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}
