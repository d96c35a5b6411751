//! CLI command implementations

pub mod analyze;
pub mod completions;
pub mod health;
pub mod search;
pub mod simulate;
pub mod tasks;
pub mod validate;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::client::{BackendClient, ClientError};
use crate::core::config::Config;

/// Config with the global `--backend-url` / `--issue-url` flags applied last
pub(crate) fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref()).into_diagnostic()?;
    if let Some(url) = &global.backend_url {
        config.backend_url = url.clone();
    }
    if let Some(url) = &global.issue_url {
        config.issue_base_url = url.clone();
    }
    tracing::debug!(backend = %config.backend_url, "configuration resolved");
    Ok(config)
}

pub(crate) fn backend_client(config: &Config) -> BackendClient {
    BackendClient::new(&config.backend_url, config.timeouts)
}

/// Report a failed backend call, telling a dead backend apart from one that answered
pub(crate) fn backend_error(err: ClientError) -> miette::Report {
    if err.is_transient() {
        tracing::warn!(error = %err, "backend did not respond");
        eprintln!(
            "{} Backend did not respond; the request was not retried",
            style("!").yellow()
        );
        return miette::miette!(help = "check that the backend is running and reachable", "{}", err);
    }
    if let Some(status) = err.status() {
        tracing::warn!(status, error = %err, "backend answered with an error");
        let what = if status >= 500 {
            "failed while handling"
        } else {
            "rejected"
        };
        eprintln!(
            "{} Backend {} the request (HTTP {})",
            style("!").yellow(),
            what,
            status
        );
    }
    miette::miette!("{}", err)
}
