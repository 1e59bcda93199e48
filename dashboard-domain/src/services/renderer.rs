use serde::Serialize;

use crate::entities::{AlertConfig, AnalysisResult, AnomalyRecord, PredictionResult};
use crate::utils::format_display_date;
use crate::value_objects::RiskLevel;

pub const MAX_DISPLAY_ROWS: usize = 100;
pub const NO_ANOMALIES_MESSAGE: &str = "No anomalies were found in the analyzed data.";
pub const NO_ALERTS_MESSAGE: &str = "No alerts configured";
const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_ANOMALY_TYPE: &str = "Anomaly detected";

pub const ROW_HEADERS: [&str; 6] = ["Date", "Plate", "Gallons", "Anomaly type", "Score", "Risk"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub date: String,
    pub plate: String,
    pub gallons: String,
    pub anomaly_type: String,
    pub score: String,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub summary: Vec<SummaryCard>,
    pub rows: Vec<DisplayRow>,
    pub total_anomalies: usize,
    pub empty_message: Option<String>,
    pub truncation_note: Option<String>,
}

impl DisplayModel {
    pub fn hidden_rows(&self) -> usize {
        self.total_anomalies.saturating_sub(self.rows.len())
    }
}

/// Converts an analysis payload into summary cards and at most
/// [`MAX_DISPLAY_ROWS`] table rows.
pub fn render(analysis: &AnalysisResult) -> DisplayModel {
    let stats = &analysis.estadisticas;
    let summary = vec![
        SummaryCard {
            label: "Total records",
            value: format_count(stats.total_records()),
        },
        SummaryCard {
            label: "Anomalies detected",
            value: format_count(stats.anomalies_detected()),
        },
        SummaryCard {
            label: "Anomaly percentage",
            value: format!("{}%", format_count(stats.anomaly_percentage())),
        },
        SummaryCard {
            label: "Unique vehicles",
            value: format_count(stats.unique_vehicles()),
        },
    ];

    let total = analysis.resultados.len();
    if total == 0 {
        return DisplayModel {
            summary,
            rows: Vec::new(),
            total_anomalies: 0,
            empty_message: Some(NO_ANOMALIES_MESSAGE.to_string()),
            truncation_note: None,
        };
    }

    let rows = analysis
        .resultados
        .iter()
        .take(MAX_DISPLAY_ROWS)
        .map(render_row)
        .collect::<Vec<_>>();

    let truncation_note = (total > MAX_DISPLAY_ROWS).then(|| {
        format!(
            "Showing the first {} of {} detected anomalies ({} more).",
            MAX_DISPLAY_ROWS,
            total,
            total - MAX_DISPLAY_ROWS
        )
    });

    DisplayModel {
        summary,
        rows,
        total_anomalies: total,
        empty_message: None,
        truncation_note,
    }
}

fn render_row(record: &AnomalyRecord) -> DisplayRow {
    DisplayRow {
        date: non_blank(record.fecha.as_deref())
            .map(format_display_date)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        plate: non_blank(record.placa.as_deref())
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        gallons: record
            .galones
            .map(|value| format!("{:.2}", value))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        anomaly_type: non_blank(record.tipo_anomalia.as_deref())
            .unwrap_or(DEFAULT_ANOMALY_TYPE)
            .to_string(),
        score: record
            .score_anomalia
            .map(|value| format!("{:.3}", value))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        risk: record.risk_level(),
    }
}

pub fn render_prediction(prediction: &PredictionResult) -> Vec<String> {
    let projected = prediction
        .consumo_proyectado
        .map(|value| format!("{:.2} gallons", value))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let trend = non_blank(prediction.tendencia.as_deref()).unwrap_or(NOT_AVAILABLE);
    let confidence = prediction
        .confianza
        .map(|value| format!("{}%", format_count(value)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    vec![
        format!("Projected consumption: {}", projected),
        format!("Trend: {}", trend),
        format!("Confidence: {}", confidence),
    ]
}

pub fn render_alerts(alerts: &[AlertConfig]) -> Vec<String> {
    if alerts.is_empty() {
        return vec![NO_ALERTS_MESSAGE.to_string()];
    }
    alerts.iter().map(AlertConfig::describe).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
