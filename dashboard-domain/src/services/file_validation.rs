use crate::entities::UploadedFile;
use crate::error::ClientError;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Checks an upload before it may be sent: spreadsheet extension and size cap.
pub fn validate_upload(file: &UploadedFile) -> Result<(), ClientError> {
    if file.name.trim().is_empty() {
        return Err(ClientError::validation("no file selected"));
    }
    if file.kind().is_none() {
        return Err(ClientError::validation(
            "only Excel files (.xlsx, .xls) are allowed",
        ));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ClientError::validation(format!(
            "file exceeds the maximum size of 10MB ({:.2} MB)",
            file.size_megabytes()
        )));
    }
    Ok(())
}
