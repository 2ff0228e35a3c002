use super::adapters;
use crate::cli::args::{AdapterKind, RunArgs};
use crate::exit_codes::{CONFIG_ERROR, RUNTIME_ERROR, SUCCESS};
use anyhow::Context;
use lweval_core::config::EnvConfig;
use lweval_core::report::{self, console, html, markdown};
use lweval_core::{EvalError, EvalRunner, RunConfig};

const ALL_SUITES: &str = "all";

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let env = EnvConfig::load(args.env_file.as_deref());

    let uses_openai =
        args.adapter == AdapterKind::Openai || args.judge_adapter == Some(AdapterKind::Openai);
    if uses_openai {
        let errors = env.validate();
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("Error: {error}");
            }
            return Ok(CONFIG_ERROR);
        }
    }

    let available = EvalRunner::list_suites();
    let suite_names: Vec<&str> = if args.suite == ALL_SUITES {
        available.clone()
    } else if EvalRunner::is_registered(&args.suite) {
        vec![args.suite.as_str()]
    } else {
        eprintln!("Error: Unknown evaluation suite '{}'", args.suite);
        eprintln!("Available suites: {}", available.join(", "));
        return Ok(CONFIG_ERROR);
    };

    let config = RunConfig {
        adapter_name: args.adapter.as_str().to_string(),
        eval_suite: args.suite.clone(),
        seed: args.seed,
        max_tokens: args.max_tokens.unwrap_or_else(|| env.max_tokens()),
        temperature: args.temperature.unwrap_or_else(|| env.temperature()),
        output_dir: args.out.clone(),
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return Ok(CONFIG_ERROR);
    }

    let data_dir = args.data_dir.clone().unwrap_or_else(|| env.data_dir.clone());
    let runner = EvalRunner::new(data_dir);
    let model = adapters::build(args.adapter, &args, &env);
    let judge = args
        .judge_adapter
        .map(|kind| adapters::build(kind, &args, &env));

    println!(
        "Running {} evaluation suite(s) with {} adapter...",
        suite_names.len(),
        args.adapter.as_str()
    );
    match args.judge_adapter {
        Some(kind) => println!("Using {} adapter for LLM-as-a-judge scoring...", kind.as_str()),
        None => println!("Warning: No judge adapter specified - evaluations will not be scored"),
    }

    let results = match runner
        .run_multiple_suites(model.as_ref(), &suite_names, &config, judge)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(exit_code_for(&e));
        }
    };

    for result in &results {
        let json_path = match runner.save_results(result) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };
        println!("Saved results: {}", json_path.display());

        let stem = report::report_stem(&args.out, result);
        let html_path = stem.with_extension("html");
        html::write(result, &html_path)
            .with_context(|| format!("failed to write {}", html_path.display()))?;
        println!("Generated HTML report: {}", html_path.display());

        let md_path = stem.with_extension("md");
        markdown::write(result, &md_path)
            .with_context(|| format!("failed to write {}", md_path.display()))?;
        println!("Generated Markdown report: {}", md_path.display());

        console::print_summary(result);
    }

    Ok(SUCCESS)
}

fn exit_code_for(err: &EvalError) -> i32 {
    match err {
        EvalError::Persist { .. } | EvalError::Serialize(_) => RUNTIME_ERROR,
        _ => CONFIG_ERROR,
    }
}
