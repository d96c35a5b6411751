//! PRA: Project Risk Analyzer
//!
//! Derives schedule-risk analytics (percentile markers, per-task risk
//! classification, sensitivity and tornado rankings, critical-path summaries)
//! from the output of an external Monte Carlo project-duration simulator.

pub mod cli;
pub mod core;
pub mod entities;
pub mod logging;
pub mod payload;
pub mod schema;
