// Risk level value object

use serde::{Deserialize, Serialize};

pub const HIGH_RISK_SCORE: f64 = 0.8;
pub const MEDIUM_RISK_SCORE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Buckets an anomaly score for display. Missing, zero and NaN scores
    /// are all treated as low risk.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(value) if value >= HIGH_RISK_SCORE => RiskLevel::High,
            Some(value) if value >= MEDIUM_RISK_SCORE => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

pub fn calculate_risk_level(score: Option<f64>) -> RiskLevel {
    RiskLevel::from_score(score)
}
