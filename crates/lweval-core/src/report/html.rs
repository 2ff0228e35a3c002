use super::{percent, title_case};
use crate::model::RunResult;
use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use std::path::Path;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }} Evaluation Report</title>
<style>
body { font-family: sans-serif; margin: 2rem; max-width: 60rem; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
.item { border: 1px solid #ddd; border-radius: 4px; padding: 0.8rem; margin: 1rem 0; }
.pass { border-left: 6px solid #2e7d32; }
.fail { border-left: 6px solid #c62828; }
pre { white-space: pre-wrap; background: #f6f6f6; padding: 0.5rem; }
</style>
</head>
<body>
<h1>{{ title }} Evaluation Report</h1>
<ul>
<li><strong>Run ID:</strong> <code>{{ run_id }}</code></li>
<li><strong>Timestamp:</strong> {{ timestamp }}</li>
<li><strong>Adapter:</strong> {{ adapter }} (v{{ adapter_version }})</li>
<li><strong>Parameters:</strong> seed={{ seed }}, max_tokens={{ max_tokens }}, temperature={{ temperature }}</li>
</ul>
<h2>Summary</h2>
<table>
<tr><th>Metric</th><th>Value</th></tr>
<tr><td>Pass rate</td><td>{{ pass_rate }}</td></tr>
<tr><td>Passed</td><td>{{ passed }}/{{ total }}</td></tr>
{%- for s in averages %}
<tr><td>{{ s.name }} (avg)</td><td>{{ s.value }}</td></tr>
{%- endfor %}
</table>
<h2>Results</h2>
{%- for item in items %}
<div class="item {{ item.status | lower }}">
<h3>{{ item.id }} ({{ item.status }})</h3>
<p><strong>Prompt:</strong></p>
<pre>{{ item.prompt }}</pre>
<p><strong>Response:</strong></p>
<pre>{{ item.response }}</pre>
{%- if item.scores %}
<p><strong>Scores:</strong> {{ item.scores }}</p>
{%- endif %}
{%- if item.notes %}
<p><strong>Notes:</strong> {{ item.notes }}</p>
{%- endif %}
</div>
{%- endfor %}
</body>
</html>
"#;

#[derive(Serialize)]
struct ScoreView {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct ItemView<'a> {
    id: &'a str,
    status: &'static str,
    prompt: &'a str,
    response: &'a str,
    scores: String,
    notes: Option<&'a str>,
}

pub fn render(result: &RunResult) -> anyhow::Result<String> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    let tmpl = env.template_from_str(TEMPLATE)?;

    let stats = &result.summary_stats;
    let averages: Vec<ScoreView> = stats
        .average_scores
        .iter()
        .map(|(name, value)| ScoreView {
            name: name.clone(),
            value: format!("{value:.2}"),
        })
        .collect();
    let items: Vec<ItemView<'_>> = result
        .eval_results
        .iter()
        .map(|r| ItemView {
            id: &r.item_id,
            status: if r.passed { "PASS" } else { "FAIL" },
            prompt: &r.prompt,
            response: &r.response,
            scores: r
                .scores
                .iter()
                .map(|(k, v)| format!("{k}={v:.2}"))
                .collect::<Vec<_>>()
                .join(", "),
            notes: r.notes.as_deref(),
        })
        .collect();

    let html = tmpl.render(context! {
        title => title_case(&result.config.eval_suite),
        run_id => &result.run_id,
        timestamp => &result.timestamp,
        adapter => &result.adapter_info.name,
        adapter_version => &result.adapter_info.version,
        seed => result.config.seed,
        max_tokens => result.config.max_tokens,
        temperature => result.config.temperature.to_string(),
        pass_rate => percent(stats.pass_rate),
        passed => stats.passed_items,
        total => stats.total_items,
        averages => averages,
        items => items,
    })?;
    Ok(html)
}

pub fn write(result: &RunResult, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, render(result)?)?;
    Ok(())
}
