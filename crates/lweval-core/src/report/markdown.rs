use super::{percent, title_case};
use crate::model::RunResult;
use std::fmt::Write as _;
use std::path::Path;

pub fn render(result: &RunResult) -> String {
    let stats = &result.summary_stats;
    let mut out = String::new();

    let _ = writeln!(out, "# {} Evaluation Report", title_case(&result.config.eval_suite));
    out.push('\n');
    let _ = writeln!(out, "- **Run ID:** `{}`", result.run_id);
    let _ = writeln!(out, "- **Timestamp:** {}", result.timestamp);
    let _ = writeln!(
        out,
        "- **Adapter:** {} (v{})",
        result.adapter_info.name, result.adapter_info.version
    );
    let _ = writeln!(
        out,
        "- **Parameters:** seed={}, max_tokens={}, temperature={}",
        result.config.seed, result.config.max_tokens, result.config.temperature
    );
    out.push('\n');

    out.push_str("## Summary\n\n");
    out.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Pass rate | {} |", percent(stats.pass_rate));
    let _ = writeln!(out, "| Passed | {}/{} |", stats.passed_items, stats.total_items);
    for (name, value) in &stats.average_scores {
        let _ = writeln!(out, "| {name} (avg) | {value:.2} |");
    }
    out.push('\n');

    out.push_str("## Results\n");
    for r in &result.eval_results {
        out.push('\n');
        let status = if r.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "### {} ({status})", r.item_id);
        out.push('\n');
        out.push_str("**Prompt:**\n\n");
        push_quoted(&mut out, &r.prompt);
        out.push_str("\n**Response:**\n\n");
        push_quoted(&mut out, &r.response);
        if !r.scores.is_empty() {
            let scores = r
                .scores
                .iter()
                .map(|(k, v)| format!("{k}={v:.2}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "\n**Scores:** {scores}");
        }
        if let Some(notes) = &r.notes {
            let _ = writeln!(out, "\n**Notes:** {notes}");
        }
    }
    out
}

fn push_quoted(out: &mut String, text: &str) {
    if text.is_empty() {
        out.push_str(">\n");
        return;
    }
    for line in text.lines() {
        let _ = writeln!(out, "> {line}");
    }
}

pub fn write(result: &RunResult, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, render(result))?;
    Ok(())
}
