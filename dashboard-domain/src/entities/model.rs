use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::AnalysisResult;
use crate::utils::deserialize_lenient_f64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub data_dir: String,
    pub report_dir: String,
    pub monitoring_interval_minutes: u64,
    pub notice_ttl_seconds: u64,
    pub history_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Longest update-polling interval, one year in minutes.
pub const MAX_MONITORING_MINUTES: u64 = 525_600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    #[serde(default)]
    pub updates_available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a> {
    pub data: &'a AnalysisResult,
    pub period: String,
    pub vehicle: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub consumo_proyectado: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tendencia: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub confianza: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic acknowledgement body (`{"message": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Which PDF the service should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Charts,
}

impl ReportKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Summary => "/generar-reporte/",
            ReportKind::Charts => "/generar-reporte-graficos/",
        }
    }

    pub fn file_name(&self, date: &str) -> String {
        match self {
            ReportKind::Summary => format!("reporte_combustible_{}.pdf", date),
            ReportKind::Charts => format!("reporte_graficos_{}.pdf", date),
        }
    }
}
