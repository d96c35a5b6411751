//! CLI module - command-line interface

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod report_view;
pub mod table;
pub mod viz;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
