use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use dashboard_domain::ports::ReportSink;

/// Writes downloaded reports into a directory, creating it on first use.
pub struct DirectoryReportSink {
    report_dir: PathBuf,
}

impl DirectoryReportSink {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }
}

#[async_trait]
impl ReportSink for DirectoryReportSink {
    async fn save_report(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| anyhow!("invalid report file name: {:?}", file_name))?;
        fs::create_dir_all(&self.report_dir).await?;
        let path = self.report_dir.join(name);
        fs::write(&path, bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "report saved");
        Ok(path)
    }
}
