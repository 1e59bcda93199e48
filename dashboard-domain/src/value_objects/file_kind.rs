// Spreadsheet kind value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadsheetKind {
    Xlsx,
    Xls,
}

impl SpreadsheetKind {
    /// Detects the kind from a file name, ignoring case.
    pub fn from_filename(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        if lower.ends_with(".xlsx") {
            Some(SpreadsheetKind::Xlsx)
        } else if lower.ends_with(".xls") {
            Some(SpreadsheetKind::Xls)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SpreadsheetKind::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            SpreadsheetKind::Xls => "application/vnd.ms-excel",
        }
    }
}
