//! Backend payload types

pub mod project;
pub mod simulation;

pub use project::{task_names, HealthStatus, ProjectInfo, TaskNames, TaskSummary};
pub use simulation::{RiskAnalysis, SimulationResult, SparseCorrelations, TaskAnalysis};
