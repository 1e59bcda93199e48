use dashboard_domain::{ClientError, PredictionResult};

use crate::{AppError, SessionController};

pub async fn predict(
    session: &SessionController,
    period: &str,
    vehicle: Option<&str>,
) -> Result<PredictionResult, AppError> {
    let period = period.trim();
    if period.is_empty() {
        return session.fail(ClientError::validation("a prediction period is required").into());
    }

    let (analysis, token) = {
        let state = session.state.read().await;
        (state.current_analysis.clone(), state.token())
    };
    let Some(analysis) = analysis else {
        return session.fail(AppError::NoAnalysis);
    };

    session.notices.info("Generating prediction...");
    match session
        .api
        .predict(
            &analysis,
            period,
            vehicle.map(str::trim).unwrap_or_default(),
            token.as_deref(),
        )
        .await
    {
        Ok(prediction) => {
            session.notices.success("Prediction generated successfully");
            Ok(prediction)
        }
        Err(err) => session.fail(err.into()),
    }
}
