use std::sync::Arc;

use tracing::{info, warn};

use dashboard_domain::{
    current_timestamp, validate_upload, AnalysisFilters, AnalysisResult, HistoryEntry,
    UploadedFile,
};

use crate::state::SessionPhase;
use crate::{AppError, SessionController};

const ANONYMOUS_USER: &str = "anonymous";

/// Makes `file` the current upload. Invalid files leave the session untouched.
pub async fn select_file(session: &SessionController, file: UploadedFile) -> Result<(), AppError> {
    if let Err(err) = validate_upload(&file) {
        return session.fail(err.into());
    }

    {
        let mut state = session.state.write().await;
        if state.phase.is_busy() {
            drop(state);
            return session.fail(AppError::Busy("file selection"));
        }
        info!(
            file = %file.name,
            size_bytes = file.size(),
            mime = %file.mime_type,
            "file selected"
        );
        state.current_file = Some(Arc::new(file));
        state.current_analysis = None;
        state.phase = SessionPhase::FileSelected;
    }

    session
        .notices
        .success("File loaded. Run an analysis to process it.");
    Ok(())
}

/// Uploads the current file for analysis. Only one analysis may be in flight;
/// on failure the session returns to the phase it had before the call.
pub async fn analyze(
    session: &SessionController,
    filters: Option<AnalysisFilters>,
) -> Result<Arc<AnalysisResult>, AppError> {
    let (file, token, previous_phase) = {
        let mut state = session.state.write().await;
        if state.phase.is_busy() {
            drop(state);
            return session.fail(AppError::Busy("analysis"));
        }
        let Some(file) = state.current_file.clone() else {
            drop(state);
            return session.fail(AppError::NoFile);
        };
        let previous_phase = state.phase;
        state.phase = SessionPhase::Analyzing;
        (file, state.token(), previous_phase)
    };

    session.notices.info("Analyzing data, please wait...");
    let filters = filters.filter(|value| !value.is_empty());
    let outcome = session
        .api
        .analyze(&file, filters.as_ref(), token.as_deref())
        .await;

    let analysis = match outcome {
        Ok(analysis) => Arc::new(analysis),
        Err(err) => {
            session.state.write().await.phase = previous_phase;
            return session.fail(err.into());
        }
    };

    let user_name = {
        let mut state = session.state.write().await;
        state.current_analysis = Some(analysis.clone());
        state.phase = SessionPhase::ResultsReady;
        state
            .current_user()
            .map(|user| user.name.clone())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string())
    };

    info!(
        file = %file.name,
        anomalies = analysis.anomaly_count(),
        "analysis completed"
    );

    let entry = HistoryEntry {
        timestamp: current_timestamp(),
        user: user_name,
        summary: analysis.estadisticas.clone(),
    };
    if let Err(err) = session
        .store
        .append_history(entry, session.config.history_limit)
        .await
    {
        warn!("failed to save analysis history: {}", err);
    }

    session.notices.success("Analysis completed successfully");
    Ok(analysis)
}
