use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use dashboard_domain::ports::{AnalysisApi, ReportSink, SessionStore};
use dashboard_domain::RuntimeConfig;

use crate::ops::{Monitor, NoticeBoard};
use crate::state::{SessionPhase, SessionState};
use crate::AppError;

/// Owns one analysis session: the current file, analysis, user and alerts,
/// plus the collaborators every operation goes through. Cloning yields
/// another handle to the same session.
#[derive(Clone)]
pub struct SessionController {
    pub config: RuntimeConfig,
    pub api: Arc<dyn AnalysisApi>,
    pub store: Arc<dyn SessionStore>,
    pub reports: Arc<dyn ReportSink>,
    pub state: Arc<RwLock<SessionState>>,
    pub notices: Arc<NoticeBoard>,
    pub monitor: Arc<Monitor>,
}

impl SessionController {
    pub fn new(
        config: RuntimeConfig,
        api: Arc<dyn AnalysisApi>,
        store: Arc<dyn SessionStore>,
        reports: Arc<dyn ReportSink>,
    ) -> Self {
        let notices = Arc::new(NoticeBoard::new(Duration::from_secs(
            config.notice_ttl_seconds,
        )));
        Self {
            config,
            api,
            store,
            reports,
            state: Arc::new(RwLock::new(SessionState::default())),
            notices,
            monitor: Arc::new(Monitor::default()),
        }
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    /// Posts the error as a notice and hands it back to the caller.
    pub(crate) fn fail<T>(&self, err: AppError) -> Result<T, AppError> {
        self.notices.error(format!("Error: {}", err));
        Err(err)
    }
}
