//! Project-level risk gauges (schedule, resource, scope)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::simulation::RiskAnalysis;

/// Colour band of a gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Safe,
    Caution,
    Danger,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Safe => write!(f, "safe"),
            RiskBand::Caution => write!(f, "caution"),
            RiskBand::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskDimension {
    Schedule,
    Resource,
    Scope,
}

impl RiskDimension {
    pub fn all() -> &'static [RiskDimension] {
        &[
            RiskDimension::Schedule,
            RiskDimension::Resource,
            RiskDimension::Scope,
        ]
    }

    /// Lower bounds of the Caution and Danger bands
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            RiskDimension::Schedule => (0.30, 0.70),
            RiskDimension::Resource => (0.20, 0.50),
            RiskDimension::Scope => (0.10, 0.30),
        }
    }

    pub fn classify(&self, score: f64) -> RiskBand {
        let (caution, danger) = self.thresholds();
        if score >= danger {
            RiskBand::Danger
        } else if score >= caution {
            RiskBand::Caution
        } else {
            RiskBand::Safe
        }
    }

    fn score(&self, analysis: &RiskAnalysis) -> f64 {
        match self {
            RiskDimension::Schedule => analysis.schedule_risk,
            RiskDimension::Resource => analysis.resource_risk,
            RiskDimension::Scope => analysis.scope_risk,
        }
    }
}

impl fmt::Display for RiskDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskDimension::Schedule => write!(f, "Schedule"),
            RiskDimension::Resource => write!(f, "Resource"),
            RiskDimension::Scope => write!(f, "Scope"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskGauge {
    pub dimension: RiskDimension,
    pub score: f64,
    pub band: RiskBand,
}

/// One gauge per dimension, in display order
pub fn gauges(analysis: &RiskAnalysis) -> Vec<RiskGauge> {
    RiskDimension::all()
        .iter()
        .map(|&dimension| {
            let score = dimension.score(analysis);
            RiskGauge {
                dimension,
                score,
                band: dimension.classify(score),
            }
        })
        .collect()
}
