//! `pra simulate` command - run a backend simulation and report on it

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::{backend_client, backend_error, load_config};
use crate::cli::output::effective_format;
use crate::cli::report_view::print_report;
use crate::cli::GlobalOpts;
use crate::core::client::{validate_simulation_count, BackendClient};
use crate::core::report::AnalysisReport;
use crate::core::session::Session;
use crate::core::tornado::TornadoMetric;
use crate::entities::project::{task_names, TaskNames};

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Project key (e.g., PROJ)
    pub project: String,

    /// Number of Monte Carlo iterations (default from config: 10000)
    #[arg(long, short = 'n')]
    pub simulations: Option<u32>,

    /// Also write the raw simulation result to this file (JSON)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Ranking metric for the tornado chart
    #[arg(long, value_enum)]
    pub metric: Option<TornadoMetric>,

    /// Skip the task name lookup for the critical path
    #[arg(long)]
    pub no_names: bool,
}

pub fn run(args: SimulateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let requested = args.simulations.unwrap_or(config.simulations.default);
    let count = validate_simulation_count(requested, &config.simulations).into_diagnostic()?;
    let client = backend_client(&config);

    eprintln!(
        "{} Running {} simulations for {}...",
        style("→").blue(),
        count,
        style(&args.project).cyan()
    );
    let result = client
        .simulate(&args.project, count)
        .map_err(backend_error)?;

    let mut session = Session::new();
    session.replace(result);
    let run = session
        .current()
        .ok_or_else(|| miette::miette!("simulation run was not recorded"))?;
    tracing::info!(
        run_id = %run.run_id,
        fingerprint = %run.fingerprint,
        "simulation received"
    );

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&run.result).into_diagnostic()?;
        std::fs::write(path, json).into_diagnostic()?;
        eprintln!("{} Saved result to {}", style("✓").green(), path.display());
    }

    let names = if args.no_names || run.result.critical_path.is_empty() {
        None
    } else {
        fetch_names(&client, &args.project)
    };

    let mut options = config.report.options();
    if let Some(metric) = args.metric {
        options.tornado_metric = metric;
    }
    let report = AnalysisReport::build(&run.result, names.as_ref(), &options);
    print_report(&report, effective_format(global.output, false), &config)
}

/// Task names for the critical path, or `None` when the lookup fails
fn fetch_names(client: &BackendClient, project: &str) -> Option<TaskNames> {
    match client.lightweight_tasks(project) {
        Ok(tasks) => Some(task_names(&tasks)),
        Err(e) => {
            tracing::warn!(project, error = %e, "task name lookup failed");
            eprintln!(
                "{} Task names unavailable ({}); listing critical path keys only",
                style("!").yellow(),
                e
            );
            None
        }
    }
}
