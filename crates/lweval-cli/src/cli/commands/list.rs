use super::adapters::ADAPTER_NAMES;
use crate::exit_codes::SUCCESS;
use lweval_core::EvalRunner;

pub fn list_suites() -> i32 {
    println!("Available evaluation suites:");
    for suite in EvalRunner::list_suites() {
        println!("  - {suite}");
    }
    SUCCESS
}

pub fn list_adapters() -> i32 {
    println!("Available model adapters:");
    for adapter in ADAPTER_NAMES {
        println!("  - {adapter}");
    }
    SUCCESS
}
