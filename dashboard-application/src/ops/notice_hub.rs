use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{info, warn};

const CHANNEL_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        }
    }
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires_at: Instant,
}

/// Holds transient notices until they expire and fans them out to
/// subscribers as they are posted.
pub struct NoticeBoard {
    ttl: Duration,
    active: Mutex<Vec<Notice>>,
    tx: broadcast::Sender<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_BUFFER);
        Self {
            ttl,
            active: Mutex::new(Vec::new()),
            tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.post(NoticeKind::Success, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.post(NoticeKind::Info, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.post(NoticeKind::Error, text.into());
    }

    pub fn post(&self, kind: NoticeKind, text: String) {
        match kind {
            NoticeKind::Error => warn!(notice = %text, "error notice"),
            _ => info!(notice = %text, kind = kind.as_str(), "notice"),
        }
        let notice = Notice {
            kind,
            text,
            expires_at: Instant::now() + self.ttl,
        };
        {
            let mut active = self.active.lock().unwrap_or_else(|err| err.into_inner());
            active.retain(|item| item.expires_at > Instant::now());
            active.push(notice.clone());
        }
        let _ = self.tx.send(notice);
    }

    /// Notices that have not yet expired, oldest first.
    pub fn active(&self) -> Vec<Notice> {
        let now = Instant::now();
        let mut active = self.active.lock().unwrap_or_else(|err| err.into_inner());
        active.retain(|item| item.expires_at > now);
        active.clone()
    }
}
