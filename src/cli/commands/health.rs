//! `pra health` command - check that the backend is up

use console::style;
use miette::Result;
use std::time::Duration;

use crate::cli::commands::{backend_client, backend_error, load_config};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,
}

pub fn run(args: HealthArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let client = backend_client(&config).with_timeout(Duration::from_secs(args.timeout));
    let status = client.health().map_err(backend_error)?;

    if !print_structured(&status, effective_format(global.output, false))? {
        let marker = if status.is_up() {
            style("✓").green()
        } else {
            style("✗").red()
        };
        let service = if status.service.is_empty() {
            client.base_url().to_string()
        } else {
            status.service.clone()
        };
        println!("{} {} is {}", marker, service, status.status);
    }

    if !status.is_up() {
        return Err(miette::miette!("backend reports status '{}'", status.status));
    }
    Ok(())
}
