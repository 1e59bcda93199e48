use tracing::error;

use dashboard_domain::HistoryEntry;

use crate::{AppError, SessionController};

pub async fn list_history(session: &SessionController) -> Result<Vec<HistoryEntry>, AppError> {
    let entries = session.store.load_history().await.map_err(|err| {
        error!("failed to load analysis history: {}", err);
        AppError::Internal(err)
    })?;
    Ok(entries)
}
