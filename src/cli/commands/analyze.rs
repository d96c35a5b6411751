//! `pra analyze` command - report on a saved simulation result

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::load_config;
use crate::cli::output::effective_format;
use crate::cli::report_view::print_report;
use crate::cli::GlobalOpts;
use crate::core::report::AnalysisReport;
use crate::core::tornado::TornadoMetric;
use crate::payload::{
    load_task_names, parse_document, parse_simulation_result, read_payload, PayloadError,
};
use crate::schema::Validator;

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Saved simulation result (JSON or YAML)
    pub file: PathBuf,

    /// Task names for the critical path: a `[{key, summary}]` listing or a key → name map
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Reject payloads that do not match the schema
    #[arg(long)]
    pub strict: bool,

    /// Ranking metric for the tornado chart
    #[arg(long, value_enum)]
    pub metric: Option<TornadoMetric>,
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let filename = args.file.display().to_string();
    let content = read_payload(&args.file)?;

    if args.strict {
        let document: serde_json::Value = parse_document(&content, &filename)?;
        let validator = Validator::simulation_result().into_diagnostic()?;
        let violations = validator.validate(&document);
        if !violations.is_empty() {
            return Err(PayloadError::Schema {
                path: filename,
                problems: violations.iter().map(ToString::to_string).collect(),
            }
            .into());
        }
    }

    let result = parse_simulation_result(&content, &filename)?;
    let names = match &args.tasks {
        Some(path) => Some(load_task_names(path)?),
        None => None,
    };

    let mut options = config.report.options();
    if let Some(metric) = args.metric {
        options.tornado_metric = metric;
    }
    let report = AnalysisReport::build(&result, names.as_ref(), &options);
    print_report(&report, effective_format(global.output, false), &config)
}
