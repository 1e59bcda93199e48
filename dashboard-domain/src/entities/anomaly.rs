// Anomaly entity
// One flagged fuel transaction as reported by the analysis service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::deserialize_lenient_f64;
use crate::value_objects::RiskLevel;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnomalyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placa: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub galones: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_anomalia: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub score_anomalia: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnomalyRecord {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score_anomalia)
    }
}
