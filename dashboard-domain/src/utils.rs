use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Accepts a JSON number, a numeric string or null. Anything unparseable
/// becomes `None` instead of failing the whole payload.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

pub fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// Formats a service date for display as `dd/mm/yyyy`. Unrecognized text is
/// returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format(DISPLAY_DATE_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return parsed.format(DISPLAY_DATE_FORMAT).to_string();
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return parsed.format(DISPLAY_DATE_FORMAT).to_string();
    }
    trimmed.to_string()
}

pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339()
}

pub fn current_date() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
