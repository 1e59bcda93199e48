// Alert configuration entities

use serde::{Deserialize, Serialize};

use crate::utils::deserialize_lenient_f64;
use crate::value_objects::AlertId;

/// Alert definition as submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub tipo: String,
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehiculo: Option<String>,
}

/// Alert definition as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub id: AlertId,
    #[serde(default)]
    pub tipo: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehiculo: Option<String>,
}

impl AlertConfig {
    pub fn describe(&self) -> String {
        let threshold = self
            .threshold
            .map(|value| value.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        match self.vehiculo.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(vehicle) => format!("[{}] {}: {} ({})", self.id, self.tipo, threshold, vehicle),
            None => format!("[{}] {}: {}", self.id, self.tipo, threshold),
        }
    }
}
