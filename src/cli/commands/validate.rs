//! `pra validate` command - check saved results against the payload schema

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::output::{effective_format, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::payload::{parse_document, read_payload};
use crate::schema::{Validator, Violation};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Simulation result files (JSON or YAML)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Stop at the first failing file
    #[arg(long)]
    pub fail_fast: bool,

    /// Show summary only, not individual violations
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Serialize)]
struct FileOutcome {
    path: String,
    valid: bool,
    problems: Vec<String>,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let validator = Validator::simulation_result().into_diagnostic()?;
    let format = effective_format(global.output, false);
    let structured = matches!(format, OutputFormat::Json | OutputFormat::Yaml);

    let mut outcomes = Vec::new();
    for path in &args.paths {
        let outcome = check_file(&validator, path);
        if !structured {
            report_outcome(&outcome, args.summary);
        }
        let failed = !outcome.valid;
        outcomes.push(outcome);
        if failed && args.fail_fast {
            break;
        }
    }

    let failed = outcomes.iter().filter(|o| !o.valid).count();
    if !print_structured(&outcomes, format)? {
        println!();
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", style("Validation Summary").bold());
        println!("{}", style("─".repeat(60)).dim());
        println!("  Files checked:  {}", style(outcomes.len()).cyan());
        println!("  Files passed:   {}", style(outcomes.len() - failed).green());
        println!("  Files failed:   {}", style(failed).red());
    }

    if failed > 0 {
        return Err(miette::miette!("{} file(s) failed validation", failed));
    }
    Ok(())
}

fn check_file(validator: &Validator, path: &Path) -> FileOutcome {
    let display_path = path.display().to_string();
    let problems = match read_payload(path)
        .and_then(|content| parse_document::<serde_json::Value>(&content, &display_path))
    {
        Ok(document) => validator
            .validate(&document)
            .iter()
            .map(Violation::to_string)
            .collect(),
        Err(e) => vec![e.to_string()],
    };
    tracing::debug!(file = %display_path, problems = problems.len(), "validated payload");
    FileOutcome {
        path: display_path,
        valid: problems.is_empty(),
        problems,
    }
}

fn report_outcome(outcome: &FileOutcome, summary_only: bool) {
    if summary_only {
        return;
    }
    if outcome.valid {
        println!("{} {}", style("✓").green(), outcome.path);
        return;
    }
    println!(
        "{} {} - {} error(s)",
        style("✗").red(),
        outcome.path,
        outcome.problems.len()
    );
    for problem in &outcome.problems {
        println!("    {}", problem);
    }
}
