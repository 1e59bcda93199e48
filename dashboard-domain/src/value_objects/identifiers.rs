// Identifier value objects

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned alert id. The service may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AlertId(pub String);

impl AlertId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlertId {
    fn from(value: &str) -> Self {
        AlertId(value.trim().to_string())
    }
}

impl<'de> Deserialize<'de> for AlertId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(text) => Ok(AlertId(text)),
            serde_json::Value::Number(number) => Ok(AlertId(number.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "alert id must be a string or number, got {other}"
            ))),
        }
    }
}
