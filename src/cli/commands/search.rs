//! `pra search` command - find projects by key or name

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{backend_client, backend_error, load_config};
use crate::cli::helpers::truncate_str;
use crate::cli::output::{effective_format, print_structured};
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::client::validate_query;
use crate::entities::project::ProjectInfo;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Text to match against project keys and names (at least 2 characters)
    pub query: String,

    /// Pick one project interactively and print its key
    #[arg(long)]
    pub select: bool,
}

pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let query = validate_query(&args.query).into_diagnostic()?;
    let config = load_config(global)?;
    let projects = backend_client(&config)
        .search_projects(query)
        .map_err(backend_error)?;

    if projects.is_empty() {
        eprintln!("{} No projects match '{}'", style("!").yellow(), query);
        return Ok(());
    }

    if args.select {
        return select_project(&projects);
    }

    let format = effective_format(global.output, true);
    if print_structured(&projects, format)? {
        return Ok(());
    }

    let mut table = Table::new(["KEY", "NAME"]);
    for project in &projects {
        let name = if format == OutputFormat::Pretty {
            truncate_str(&project.name, 48)
        } else {
            project.name.clone()
        };
        table.row([project.key.clone(), name]);
    }
    table.print(format)
}

/// Prompt on stderr so the chosen key can be captured from stdout
fn select_project(projects: &[ProjectInfo]) -> Result<()> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(miette::miette!(
            "--select needs an interactive terminal; drop it to list matches"
        ));
    }

    let items: Vec<String> = projects.iter().map(ToString::to_string).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Project")
        .items(&items)
        .default(0)
        .interact_on(&term)
        .into_diagnostic()?;

    let project = &projects[choice];
    tracing::info!(project = %project.key, "project selected");
    println!("{}", project.key);
    Ok(())
}
