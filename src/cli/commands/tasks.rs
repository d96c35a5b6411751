//! `pra tasks` command - list a project's tasks

use miette::Result;

use crate::cli::commands::{backend_client, backend_error, load_config};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct TasksArgs {
    /// Project key (e.g., PROJ)
    pub project: String,

    /// Include a browser link column
    #[arg(long)]
    pub links: bool,
}

pub fn run(args: TasksArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let tasks = backend_client(&config)
        .lightweight_tasks(&args.project)
        .map_err(backend_error)?;

    let format = effective_format(global.output, true);
    if print_structured(&tasks, format)? {
        return Ok(());
    }

    let mut headers = vec!["KEY", "SUMMARY"];
    if args.links {
        headers.push("LINK");
    }
    let mut table = Table::new(headers);
    for task in &tasks {
        let mut cells = vec![task.key.clone(), task.summary.clone()];
        if args.links {
            cells.push(config.issue_url(&task.key));
        }
        table.row(cells);
    }
    table.print(format)
}
