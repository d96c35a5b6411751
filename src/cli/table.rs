//! Tabular output in pretty, TSV, CSV and Markdown forms

use miette::{IntoDiagnostic, Result};
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

/// Rows of display strings under a header
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rounded box table for the terminal
    pub fn to_pretty(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.clone());
        for row in &self.rows {
            builder.push_record(row.clone());
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    pub fn to_markdown(&self) -> String {
        let escape = |s: &String| s.replace('|', "\\|");
        let mut out = String::new();
        out.push_str(&format!(
            "| {} |\n",
            self.headers.iter().map(escape).collect::<Vec<_>>().join(" | ")
        ));
        out.push_str(&format!(
            "|{}|\n",
            self.headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in &self.rows {
            out.push_str(&format!(
                "| {} |\n",
                row.iter().map(escape).collect::<Vec<_>>().join(" | ")
            ));
        }
        out
    }

    /// Write as delimited text with a header row
    pub fn write_delimited<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(if delimiter == b'\t' {
                csv::QuoteStyle::Never
            } else {
                csv::QuoteStyle::Necessary
            })
            .from_writer(writer);
        wtr.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            if delimiter == b'\t' {
                let cleaned: Vec<String> = row.iter().map(|c| c.replace(['\t', '\n'], " ")).collect();
                wtr.write_record(&cleaned).into_diagnostic()?;
            } else {
                wtr.write_record(row).into_diagnostic()?;
            }
        }
        wtr.flush().into_diagnostic()?;
        Ok(())
    }

    pub fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut buf = Vec::new();
        self.write_delimited(&mut buf, delimiter)?;
        String::from_utf8(buf).into_diagnostic()
    }

    /// Print in the given (already resolved) format
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Csv => self.write_delimited(std::io::stdout().lock(), b',')?,
            OutputFormat::Md => print!("{}", self.to_markdown()),
            OutputFormat::Pretty => println!("{}", self.to_pretty()),
            _ => self.write_delimited(std::io::stdout().lock(), b'\t')?,
        }
        Ok(())
    }
}
