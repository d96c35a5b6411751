//! Core module - risk analytics, configuration and backend access

pub mod client;
pub mod completion;
pub mod config;
pub mod correlation;
pub mod critical_path;
pub mod entity;
pub mod gauge;
pub mod histogram;
pub mod percentile;
pub mod report;
pub mod resolver;
pub mod sensitivity;
pub mod session;
pub mod tornado;

pub use client::{BackendClient, ClientError};
pub use completion::{rank_completion, CompletionEntry};
pub use config::{Config, ConfigError};
pub use correlation::CorrelationMatrix;
pub use critical_path::{CriticalPath, CriticalPathRow, CriticalPathSummary};
pub use entity::{Provenance, RiskLevel};
pub use gauge::{RiskBand, RiskDimension, RiskGauge};
pub use histogram::DurationHistogram;
pub use percentile::DurationStats;
pub use report::{AnalysisReport, ReportError, ReportOptions};
pub use resolver::{classify_risk, ResolvedTaskAnalysis, TaskAnalysisResolver};
pub use sensitivity::{rank_by_sensitivity, sensitivity_score, SensitivityEntry};
pub use session::{Session, SimulationRun};
pub use tornado::{TornadoEntry, TornadoMetric, TornadoRanker};
