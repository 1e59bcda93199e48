use std::path::PathBuf;

use async_trait::async_trait;

use crate::entities::{HistoryEntry, UserSession};

/// Locally persisted client state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_session(&self) -> anyhow::Result<Option<UserSession>>;
    async fn save_session(&self, session: &UserSession) -> anyhow::Result<()>;
    async fn clear_session(&self) -> anyhow::Result<()>;

    async fn load_history(&self) -> anyhow::Result<Vec<HistoryEntry>>;
    /// Appends an entry, keeping only the newest `limit` entries.
    async fn append_history(&self, entry: HistoryEntry, limit: usize) -> anyhow::Result<()>;
}

/// Destination for downloaded report documents.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn save_report(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf>;
}
