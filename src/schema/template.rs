//! Markdown report rendering with embedded Tera templates

use chrono::Utc;
use rust_embed::Embed;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::core::report::{AnalysisReport, ReportError};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

pub const REPORT_TEMPLATE: &str = "report.md.tera";

/// Format a number with `digits` decimals (default 1); null renders as "-"
fn num_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let digits = args.get("digits").and_then(Value::as_u64).unwrap_or(1) as usize;
    Ok(match value.as_f64() {
        Some(x) => Value::String(format!("{:.*}", digits, x)),
        None => Value::String("-".to_string()),
    })
}

/// Format a 0-1 fraction as a percentage
fn pct_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(match value.as_f64() {
        Some(x) => Value::String(format!("{:.1}%", x * 100.0)),
        None => Value::String("-".to_string()),
    })
}

/// Renders an [`AnalysisReport`] through the embedded templates
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)?;
                }
            }
        }
        tera.register_filter("num", num_filter);
        tera.register_filter("pct", pct_filter);

        Ok(Self { tera })
    }

    pub fn render_markdown(
        &self,
        report: &AnalysisReport,
        issue_base_url: &str,
    ) -> Result<String, ReportError> {
        if !self.tera.get_template_names().any(|n| n == REPORT_TEMPLATE) {
            return Err(ReportError::MissingTemplate(REPORT_TEMPLATE.to_string()));
        }

        let mut context = Context::from_serialize(report)?;
        context.insert("issue_base_url", issue_base_url.trim_end_matches('/'));
        context.insert(
            "generated_at",
            &Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        );

        Ok(self.tera.render(REPORT_TEMPLATE, &context)?)
    }
}
