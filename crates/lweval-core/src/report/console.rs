use super::{percent, title_case};
use crate::model::RunResult;

/// Summary block printed after each run.
pub fn format_summary(result: &RunResult) -> String {
    let stats = &result.summary_stats;
    let mut lines = vec![
        format!("{} Results:", title_case(&result.config.eval_suite)),
        format!("  Pass Rate: {}", percent(stats.pass_rate)),
        format!("  Passed: {}/{}", stats.passed_items, stats.total_items),
    ];
    if !stats.average_scores.is_empty() {
        lines.push("  Average Scores:".to_string());
        for (name, value) in &stats.average_scores {
            lines.push(format!("    {name}: {value:.2}"));
        }
    }
    lines.join("\n")
}

pub fn print_summary(result: &RunResult) {
    println!();
    println!("{}", format_summary(result));
}
