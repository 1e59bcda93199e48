// Uploaded file entity

use crate::value_objects::SpreadsheetKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl UploadedFile {
    /// Builds a file, deriving the MIME type from the extension when it is a
    /// known spreadsheet kind.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = SpreadsheetKind::from_filename(&name)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self {
            name,
            bytes,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_megabytes(&self) -> f64 {
        self.size() as f64 / 1024.0 / 1024.0
    }

    pub fn kind(&self) -> Option<SpreadsheetKind> {
        SpreadsheetKind::from_filename(&self.name)
    }
}
