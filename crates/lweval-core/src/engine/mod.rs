pub mod runner;

pub use runner::{format_timestamp, EvalRunner, TIMESTAMP_FORMAT};
