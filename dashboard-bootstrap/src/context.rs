use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use dashboard_application::commands::auth_commands::restore_session;
use dashboard_application::SessionController;
use dashboard_infrastructure::{
    AppConfig, DirectoryReportSink, FileSessionStore, HttpAnalysisClient,
};

pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionController,
}

impl AppContext {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let api = Arc::new(HttpAnalysisClient::from_config(&runtime_config)?);
        let store = Arc::new(FileSessionStore::new(&runtime_config.data_dir));
        let reports = Arc::new(DirectoryReportSink::new(&runtime_config.report_dir));

        let session = SessionController::new(runtime_config, api, store, reports);
        if let Some(user) = restore_session(&session).await {
            info!(email = %user.email, "restored session");
        }

        Ok(Self { config, session })
    }
}
