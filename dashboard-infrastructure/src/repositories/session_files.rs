use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use dashboard_domain::ports::SessionStore;
use dashboard_domain::{HistoryEntry, UserSession};

pub const SESSION_FILE: &str = "session.json";
pub const HISTORY_FILE: &str = "history.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(rename = "analysisHistory", default)]
    analysis_history: Vec<HistoryEntry>,
}

/// Keeps the signed-in session and the analysis history as JSON files in
/// the data directory.
pub struct FileSessionStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    async fn read_history(&self) -> Result<Vec<HistoryEntry>> {
        let path = self.history_path();
        let Some(content) = read_optional(&path).await? else {
            return Ok(Vec::new());
        };
        let file: HistoryFile = serde_json::from_str(&content)
            .with_context(|| format!("invalid history file {}", path.display()))?;
        Ok(file.analysis_history)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load_session(&self) -> Result<Option<UserSession>> {
        let path = self.session_path();
        let Some(content) = read_optional(&path).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<UserSession>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!("ignoring unreadable session file {}: {}", path.display(), err);
                Ok(None)
            }
        }
    }

    async fn save_session(&self, session: &UserSession) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let content = serde_json::to_string_pretty(session)?;
        write_file(&self.session_path(), &content).await
    }

    async fn clear_session(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.session_path();
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        self.read_history().await
    }

    async fn append_history(&self, entry: HistoryEntry, limit: usize) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.read_history().await?;
        history.push(entry);
        if history.len() > limit {
            let excess = history.len() - limit;
            history.drain(..excess);
        }
        debug!(entries = history.len(), "history updated");
        let content = serde_json::to_string_pretty(&HistoryFile {
            analysis_history: history,
        })?;
        write_file(&self.history_path(), &content).await
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
    }
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("write {}", path.display()))
}
