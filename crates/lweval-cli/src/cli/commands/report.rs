use crate::cli::args::{ReportArgs, ReportFormat};
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use anyhow::Context;
use lweval_core::report::{self, html, markdown};
use std::path::Path;

pub(crate) fn run(args: ReportArgs) -> anyhow::Result<i32> {
    let json_path = &args.json_path;
    if !json_path.exists() {
        eprintln!("Error: File not found: {}", json_path.display());
        return Ok(CONFIG_ERROR);
    }

    let result = match report::load_result(json_path) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error loading results: {e:#}");
            return Ok(CONFIG_ERROR);
        }
    };

    let dir = json_path.parent().unwrap_or_else(|| Path::new(""));
    let stem = json_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    if matches!(args.format, ReportFormat::Html | ReportFormat::Both) {
        let html_path = dir.join(format!("{stem}.html"));
        html::write(&result, &html_path)
            .with_context(|| format!("failed to write {}", html_path.display()))?;
        println!("Generated HTML report: {}", html_path.display());
    }

    if matches!(args.format, ReportFormat::Markdown | ReportFormat::Both) {
        let md_path = dir.join(format!("{stem}.md"));
        markdown::write(&result, &md_path)
            .with_context(|| format!("failed to write {}", md_path.display()))?;
        println!("Generated Markdown report: {}", md_path.display());
    }

    Ok(SUCCESS)
}
