use tracing::{info, warn};

use dashboard_domain::HealthStatus;

use crate::{AppError, SessionController};

/// Probes the service and records whether it is reachable.
pub async fn check_api_health(session: &SessionController) -> Result<HealthStatus, AppError> {
    let outcome = session.api.check_health().await;
    session.state.write().await.api_connected = Some(outcome.is_ok());
    match outcome {
        Ok(status) => {
            info!(status = %status.status, "api connected");
            Ok(status)
        }
        Err(err) => {
            warn!("api unavailable: {}", err);
            Err(err.into())
        }
    }
}
