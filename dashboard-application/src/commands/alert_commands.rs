use tracing::info;

use dashboard_domain::{AlertConfig, AlertId, AlertRequest, ClientError};

use crate::{AppError, SessionController};

pub async fn configure_alert(
    session: &SessionController,
    alert_type: &str,
    threshold: Option<f64>,
    vehicle: Option<&str>,
) -> Result<AlertConfig, AppError> {
    let alert_type = alert_type.trim();
    if alert_type.is_empty() {
        return session.fail(ClientError::validation("an alert type is required").into());
    }
    let Some(threshold) = threshold.filter(|value| value.is_finite()) else {
        return session.fail(ClientError::validation("a threshold is required").into());
    };

    let request = AlertRequest {
        tipo: alert_type.to_string(),
        threshold,
        vehiculo: vehicle
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string),
    };

    let token = session.state.read().await.token();
    match session.api.configure_alert(&request, token.as_deref()).await {
        Ok(alert) => {
            info!(id = %alert.id, kind = %alert.tipo, "alert configured");
            session.state.write().await.alerts.push(alert.clone());
            session.notices.success("Alert configured successfully");
            Ok(alert)
        }
        Err(err) => session.fail(err.into()),
    }
}

pub async fn remove_alert(session: &SessionController, id: &AlertId) -> Result<(), AppError> {
    let token = session.state.read().await.token();
    match session.api.remove_alert(id, token.as_deref()).await {
        Ok(_) => {
            session
                .state
                .write()
                .await
                .alerts
                .retain(|alert| &alert.id != id);
            session.notices.info("Alert removed");
            Ok(())
        }
        Err(err) => session.fail(err.into()),
    }
}

pub async fn list_alerts(session: &SessionController) -> Vec<AlertConfig> {
    session.state.read().await.alerts.clone()
}
