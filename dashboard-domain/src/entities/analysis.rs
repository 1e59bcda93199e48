// Analysis entities
// The service payload is kept intact so it can be posted back for reports

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::AnomalyRecord;
use crate::utils::value_as_f64;

/// Summary block (`estadisticas`). Kept as the raw map so integer counts are
/// posted back to the service exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisStatistics(pub Map<String, Value>);

impl AnalysisStatistics {
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(value_as_f64)
    }

    pub fn total_records(&self) -> f64 {
        self.number("total_registros").unwrap_or_default()
    }

    pub fn anomalies_detected(&self) -> f64 {
        self.number("anomalias_detectadas").unwrap_or_default()
    }

    pub fn anomaly_percentage(&self) -> f64 {
        self.number("porcentaje_anomalias").unwrap_or_default()
    }

    pub fn unique_vehicles(&self) -> f64 {
        self.number("vehiculos_unicos").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub estadisticas: AnalysisStatistics,
    #[serde(default)]
    pub resultados: Vec<AnomalyRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn anomaly_count(&self) -> usize {
        self.resultados.len()
    }
}

/// Optional narrowing sent alongside an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl AnalysisFilters {
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.vehicle.is_none()
            && self.zone.is_none()
    }
}
