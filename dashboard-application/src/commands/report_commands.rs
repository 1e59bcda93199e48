use std::path::PathBuf;

use tracing::info;

use dashboard_domain::{current_date, ReportKind};

use crate::state::SessionPhase;
use crate::{AppError, SessionController};

/// Asks the service to render a PDF for the current analysis and saves it
/// through the report sink. The session is back in `ResultsReady` afterwards,
/// whether or not the report succeeded.
pub async fn generate_report(
    session: &SessionController,
    kind: ReportKind,
) -> Result<PathBuf, AppError> {
    let (analysis, token) = {
        let mut state = session.state.write().await;
        if state.phase.is_busy() {
            drop(state);
            return session.fail(AppError::Busy("report generation"));
        }
        let Some(analysis) = state.current_analysis.clone() else {
            drop(state);
            return session.fail(AppError::NoAnalysis);
        };
        state.phase = SessionPhase::ReportGenerating;
        (analysis, state.token())
    };

    session.notices.info(match kind {
        ReportKind::Summary => "Generating PDF report...",
        ReportKind::Charts => "Generating report with charts...",
    });

    let outcome = match session
        .api
        .generate_report(kind, &analysis, token.as_deref())
        .await
    {
        Ok(bytes) => session
            .reports
            .save_report(&kind.file_name(&current_date()), &bytes)
            .await
            .map_err(AppError::from),
        Err(err) => Err(AppError::from(err)),
    };

    session.state.write().await.phase = SessionPhase::ResultsReady;

    match outcome {
        Ok(path) => {
            info!(path = %path.display(), "report saved");
            session
                .notices
                .success(format!("Report downloaded to {}", path.display()));
            Ok(path)
        }
        Err(err) => session.fail(err),
    }
}
