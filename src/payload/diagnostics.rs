//! Payload errors with source highlighting

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A parse failure pointing at the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(pra::payload::syntax),
    help("Simulation results are JSON (or YAML) documents with camelCase keys such as `projectKey` and `durationDistribution`.")
)]
pub struct PayloadSyntaxError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl PayloadSyntaxError {
    pub fn from_json_error(err: &serde_json::Error, content: &str, filename: &str) -> Self {
        let offset = offset_of(content, err.line(), err.column());
        Self {
            message: format!("invalid JSON: {}", err),
            src: NamedSource::new(filename, content.to_string()),
            span: offset.map(|o| span_at(content, o)),
        }
    }

    pub fn from_yaml_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let offset = err.location().map(|loc| loc.index().min(content.len()));
        Self {
            message: format!("invalid YAML: {}", err),
            src: NamedSource::new(filename, content.to_string()),
            span: offset.map(|o| span_at(content, o)),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum PayloadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] PayloadSyntaxError),

    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(pra::payload::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} does not match the simulation result schema ({} problem(s))", .problems.len())]
    #[diagnostic(
        code(pra::payload::schema),
        help("Run `pra validate` for the full list of schema violations.")
    )]
    Schema { path: String, problems: Vec<String> },
}

/// Byte offset of a 1-based line and column
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(content.len()))
}

/// One-character span at `offset`, widened to a full UTF-8 character
fn span_at(content: &str, offset: usize) -> SourceSpan {
    let mut start = offset.min(content.len());
    while start > 0 && !content.is_char_boundary(start) {
        start -= 1;
    }
    let len = content[start..].chars().next().map_or(0, char::len_utf8);
    SourceSpan::new(start.into(), len)
}
