use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lweval",
    version,
    about = "Behavioral evaluation of text-generation models with LLM-as-judge scoring"
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available evaluation suites
    ListSuites,
    /// List available model adapters
    ListAdapters,
    /// Run evaluation suite(s) against a model adapter
    Run(RunArgs),
    /// Render reports from a saved JSON run file
    Report(ReportArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdapterKind {
    Dummy,
    Openai,
}

impl AdapterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Dummy => "dummy",
            AdapterKind::Openai => "openai",
        }
    }
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Model adapter to evaluate
    #[arg(long, value_enum)]
    pub adapter: AdapterKind,

    /// Evaluation suite to run, or `all`
    #[arg(long)]
    pub suite: String,

    /// Output directory for results and reports
    #[arg(long, default_value = "./reports")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Model name for the OpenAI adapter (default: LWEVAL_DEFAULT_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Generation token budget (default: LWEVAL_MAX_TOKENS, else 256)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (default: LWEVAL_TEMPERATURE, else 0.2)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Adapter used for LLM-as-judge scoring; without one nothing is graded
    #[arg(long, value_enum)]
    pub judge_adapter: Option<AdapterKind>,

    /// Directory holding `<suite>.jsonl` files
    #[arg(long, env = "LWEVAL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Env file to load before reading configuration (default: ./.env)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Per-call generation timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Html,
    Markdown,
    Both,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to a saved `run_*.json` file
    #[arg(long = "json")]
    pub json_path: PathBuf,

    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: ReportFormat,
}
