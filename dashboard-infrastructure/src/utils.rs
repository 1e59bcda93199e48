use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tokio::fs;

use dashboard_domain::UploadedFile;

/// Reads a local file into an upload, named after its final path component.
pub async fn read_upload(path: &Path) -> Result<UploadedFile> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("not a file path: {}", path.display()))?;
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    Ok(UploadedFile::new(name, bytes))
}
