use std::fmt;
use std::sync::Arc;

use dashboard_domain::{AlertConfig, AnalysisResult, UploadedFile, User, UserSession};

/// Where the analysis session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    FileSelected,
    Analyzing,
    ResultsReady,
    ReportGenerating,
}

impl SessionPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Analyzing | SessionPhase::ReportGenerating)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::FileSelected => "file selected",
            SessionPhase::Analyzing => "analyzing",
            SessionPhase::ResultsReady => "results ready",
            SessionPhase::ReportGenerating => "generating report",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub current_file: Option<Arc<UploadedFile>>,
    pub current_analysis: Option<Arc<AnalysisResult>>,
    pub user: Option<UserSession>,
    pub alerts: Vec<AlertConfig>,
    /// `None` until the first health check completes.
    pub api_connected: Option<bool>,
}

impl SessionState {
    pub fn token(&self) -> Option<String> {
        self.user.as_ref().map(|session| session.token.clone())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref().map(|session| &session.user)
    }
}
