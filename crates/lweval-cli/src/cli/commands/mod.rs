use super::args::{Cli, Command};

pub(crate) mod adapters;
pub mod list;
pub(crate) mod report;
pub(crate) mod run;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::ListSuites => Ok(list::list_suites()),
        Command::ListAdapters => Ok(list::list_adapters()),
        Command::Run(args) => run::run(args).await,
        Command::Report(args) => report::run(args),
    }
}
