use std::fmt::Write;

use dashboard_application::{Notice, NoticeKind};
use dashboard_domain::{render_alerts, AlertConfig, DisplayModel, HistoryEntry, ROW_HEADERS};

/// Plain-text table for the anomaly display model.
pub fn format_display(model: &DisplayModel) -> String {
    let mut out = String::new();
    for card in &model.summary {
        let _ = writeln!(out, "{:<22} {}", format!("{}:", card.label), card.value);
    }
    let _ = writeln!(out);

    if let Some(message) = &model.empty_message {
        let _ = writeln!(out, "{}", message);
        return out;
    }

    let rows: Vec<[String; 6]> = model
        .rows
        .iter()
        .map(|row| {
            [
                row.date.clone(),
                row.plate.clone(),
                row.gallons.clone(),
                row.anomaly_type.clone(),
                row.score.clone(),
                row.risk.label().to_string(),
            ]
        })
        .collect();

    let mut widths = ROW_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = ROW_HEADERS.iter().map(ToString::to_string).collect();
    write_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(&mut out, &rule, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }

    if let Some(note) = &model.truncation_note {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", note);
    }
    out
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses recorded yet\n".to_string();
    }
    let mut out = String::new();
    for entry in entries.iter().rev() {
        let _ = writeln!(
            out,
            "{}  {:<16} records: {:<6} anomalies: {}",
            entry.timestamp,
            entry.user,
            entry.summary.total_records(),
            entry.summary.anomalies_detected()
        );
    }
    out
}

pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Info => "info",
        NoticeKind::Error => "error",
    };
    format!("[{}] {}", tag, notice.text)
}

/// The alert the service just created. Earlier alerts are not known to a
/// fresh process, so only this one is shown.
pub fn format_configured_alert(alert: &AlertConfig) -> String {
    let mut out = String::from("Alert configured:\n");
    for line in render_alerts(std::slice::from_ref(alert)) {
        let _ = writeln!(out, "  {}", line);
    }
    out
}
