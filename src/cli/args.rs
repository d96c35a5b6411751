//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::analyze::AnalyzeArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::health::HealthArgs;
use crate::cli::commands::search::SearchArgs;
use crate::cli::commands::simulate::SimulateArgs;
use crate::cli::commands::tasks::TasksArgs;
use crate::cli::commands::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(
    name = "pra",
    version,
    about = "Project Risk Analyzer - schedule risk analytics over Monte Carlo simulations",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Config file (default: <config dir>/pra/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Issue tracker base URL used for task links
    #[arg(long, global = true)]
    pub issue_url: Option<String>,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty for reports, TSV for lists
    #[default]
    Auto,
    /// Styled terminal output with charts
    Pretty,
    Json,
    Yaml,
    /// Tab-separated values
    Tsv,
    Csv,
    /// Markdown
    Md,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Md => write!(f, "md"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search projects by key or name
    Search(SearchArgs),

    /// List a project's tasks (key and summary)
    Tasks(TasksArgs),

    /// Run a simulation on the backend and report on it
    Simulate(SimulateArgs),

    /// Report on a saved simulation result
    Analyze(AnalyzeArgs),

    /// Check saved simulation results against the payload schema
    Validate(ValidateArgs),

    /// Check that the backend is up
    Health(HealthArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
