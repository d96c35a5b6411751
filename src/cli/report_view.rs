//! Rendering an analysis report for the terminal and tabular formats

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{
    format_days, format_hours, format_optional_percent, format_percent, truncate_str,
};
use crate::cli::output::print_structured;
use crate::cli::table::Table;
use crate::cli::viz::{render_bar, render_gauge, render_histogram, render_tornado, Marker};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::report::{AnalysisReport, DurationMarkers};
use crate::schema::ReportRenderer;

const RULE_WIDTH: usize = 72;

/// Print a report in the resolved output format
pub fn print_report(report: &AnalysisReport, format: OutputFormat, config: &Config) -> Result<()> {
    if print_structured(report, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Md => {
            let renderer = ReportRenderer::new().into_diagnostic()?;
            let md = renderer
                .render_markdown(report, &config.issue_base_url)
                .into_diagnostic()?;
            print!("{}", md);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            critical_path_table(report, config).print(format)?;
        }
        _ => print_pretty(report, config),
    }
    Ok(())
}

/// Terminal rendering of the critical path, one issue link per task
fn critical_path_body(report: &AnalysisReport, config: &Config) -> String {
    if report.critical_path.is_empty() {
        return "  No critical path information".to_string();
    }
    if report.names_available {
        let mut table = Table::new([
            "#", "Task", "Name", "Completion", "Risk", "Estimated", "Source", "Link",
        ]);
        for row in &report.critical_path.rows {
            let a = &row.analysis;
            table.row([
                row.rank.to_string(),
                row.task_key.clone(),
                truncate_str(&row.task_name, 32),
                format_percent(a.completion_probability),
                a.risk_level.to_string(),
                a.estimated_duration.to_string(),
                a.provenance.to_string(),
                config.issue_url(&row.task_key),
            ]);
        }
        return table.to_pretty();
    }
    // Task names unavailable: key-only listing
    report
        .critical_path
        .rows
        .iter()
        .map(|row| {
            format!(
                "  {}. {}  {}",
                row.rank,
                row.task_key,
                style(config.issue_url(&row.task_key)).dim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Critical path rows as a flat table
pub fn critical_path_table(report: &AnalysisReport, config: &Config) -> Table {
    let mut table = Table::new([
        "RANK",
        "KEY",
        "NAME",
        "COMPLETION",
        "RISK",
        "ESTIMATED",
        "OPTIMISTIC",
        "PESSIMISTIC",
        "SOURCE",
        "LINK",
    ]);
    for row in &report.critical_path.rows {
        let a = &row.analysis;
        table.row([
            row.rank.to_string(),
            row.task_key.clone(),
            row.task_name.clone(),
            format!("{:.3}", a.completion_probability),
            a.risk_level.to_string(),
            a.estimated_duration.to_string(),
            a.optimistic_duration.to_string(),
            a.pessimistic_duration.to_string(),
            a.provenance.to_string(),
            config.issue_url(&row.task_key),
        ]);
    }
    table
}

fn section(title: &str) {
    println!();
    println!("{}", style(title).bold().underlined());
}

fn print_markers(label: &str, markers: &DurationMarkers) {
    let cell = |hours: f64| format!("{} ({})", format_hours(hours), format_days(hours));
    println!(
        "  {:<10} P50 {}   P80 {}   P90 {}",
        style(label).dim(),
        style(cell(markers.p50.hours)).green(),
        style(cell(markers.p80.hours)).yellow(),
        style(cell(markers.p90.hours)).red(),
    );
    println!(
        "  {:<10} mean {}   std dev {}",
        "",
        cell(markers.mean.hours),
        cell(markers.std_dev.hours),
    );
}

pub fn print_pretty(report: &AnalysisReport, config: &Config) {
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    println!(
        "{} {}  {}",
        style("Project").bold(),
        style(&report.project_key).cyan(),
        style(format!("{} simulations", report.total_simulations)).dim()
    );
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());

    if !report.overall_assessment.is_empty() {
        println!();
        println!("{}", report.overall_assessment);
    }

    section("Duration");
    print_markers("reported", &report.reported);
    if let Some(derived) = &report.derived {
        print_markers("samples", derived);
    }

    section("Distribution");
    let source = report.derived.as_ref().unwrap_or(&report.reported);
    let markers = [
        Marker { label: "P50", symbol: '5', value: source.p50.hours },
        Marker { label: "P80", symbol: '8', value: source.p80.hours },
        Marker { label: "P90", symbol: '9', value: source.p90.hours },
    ];
    println!("{}", render_histogram(&report.histogram, &markers));

    section("Risk gauges");
    for gauge in &report.gauges {
        println!("{}", render_gauge(gauge));
    }

    section("Critical path");
    println!("{}", critical_path_body(report, config));

    let summary = &report.critical_path.summary;
    if summary.has_data() {
        println!(
            "  {} tasks, {} high risk ({}), average completion {}",
            summary.total_tasks,
            summary.high_risk_tasks,
            summary
                .high_risk_percent
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string()),
            format_optional_percent(summary.average_completion_probability),
        );
    }

    section("Completion probability (top tasks)");
    if report.completion_ranking.is_empty() {
        println!("  No task completion data");
    } else {
        let width = report
            .completion_ranking
            .iter()
            .map(|e| e.task_key.len())
            .max()
            .unwrap_or(0);
        for entry in &report.completion_ranking {
            println!(
                "  {:<w$} {} {}",
                entry.task_key,
                style(render_bar(entry.probability, 1.0, 30)).blue(),
                format_percent(entry.probability),
                w = width
            );
        }
    }

    section(&format!("Tornado ({})", report.tornado_metric));
    let width = report.tornado.iter().map(|e| e.task_key.len()).max().unwrap_or(0);
    println!("{}", render_tornado(&report.tornado, width));

    if !report.sensitivity.is_empty() {
        section("Sensitivity");
        let mut table = Table::new(["Task", "Score", "Completion", "Variability", "Source"]);
        for entry in report.sensitivity.iter().take(10) {
            table.row([
                entry.task_key.clone(),
                format!("{:.3}", entry.score),
                format_percent(entry.completion_probability),
                format!("{:.3}", entry.variability),
                entry.provenance.to_string(),
            ]);
        }
        println!("{}", table.to_pretty());
    }

    if let Some(matrix) = &report.correlations {
        section("Correlations");
        if matrix.is_empty() {
            println!("  (empty)");
        } else {
            let mut headers = vec![String::new()];
            headers.extend(matrix.keys.iter().cloned());
            let mut table = Table::new(headers);
            for (key, row) in matrix.keys.iter().zip(&matrix.values) {
                let mut cells = vec![key.clone()];
                cells.extend(row.iter().map(|v| format!("{:+.2}", v)));
                table.row(cells);
            }
            println!("{}", table.to_pretty());
        }
    }

    section("High risk tasks");
    if report.high_risk_tasks.is_empty() {
        println!("  None flagged");
    } else {
        for key in &report.high_risk_tasks {
            println!("  • {}  {}", style(key).red(), style(config.issue_url(key)).dim());
        }
    }

    section("Recommendations");
    if report.recommendations.is_empty() {
        println!("  No recommendations.");
    } else {
        for (i, rec) in report.recommendations.iter().enumerate() {
            println!("  {}. {}", i + 1, rec);
        }
    }

    if !report.fallback_tasks.is_empty() {
        println!();
        println!(
            "{} {} task(s) use placeholder values (no simulator detail): {}",
            style("!").yellow(),
            report.fallback_tasks.len(),
            report.fallback_tasks.join(", ")
        );
    }
    for warning in &report.warnings {
        println!("{} {}", style("!").yellow(), warning);
    }
}
