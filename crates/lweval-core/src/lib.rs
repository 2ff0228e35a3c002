//! Behavioral evaluation of text-generation models.
//!
//! A run pairs an [`providers::llm::LlmAdapter`] with one of the registered
//! suites, scores every item (optionally through an [`judge::LlmJudge`]) and
//! produces a [`model::RunResult`] that can be persisted and rendered.

pub mod config;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod judge;
pub mod model;
pub mod providers;
pub mod report;
pub mod suites;

pub use engine::EvalRunner;
pub use errors::EvalError;
pub use model::{EvalItem, EvalResult, ExpectedBehavior, RunConfig, RunResult, SummaryStats};
