use dashboard_domain::{render, DisplayModel};

use crate::SessionController;

/// Display model for the current analysis, if there is one.
pub async fn display_model(session: &SessionController) -> Option<DisplayModel> {
    let analysis = session.state.read().await.current_analysis.clone();
    analysis.map(|analysis| render(&analysis))
}
