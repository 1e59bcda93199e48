use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use dashboard_domain::ports::AnalysisApi;
use dashboard_domain::{ClientError, UpdateStatus, MAX_MONITORING_MINUTES};

use crate::ops::NoticeBoard;
use crate::state::SessionState;
use crate::{AppError, SessionController};

/// Handle to the periodic update poller. At most one timer runs at a time.
#[derive(Default)]
pub struct Monitor {
    active: Mutex<Option<ActiveTimer>>,
}

struct ActiveTimer {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl Monitor {
    fn replace(&self, next: Option<ActiveTimer>) -> bool {
        let mut active = self.active.lock().unwrap_or_else(|err| err.into_inner());
        let previous = std::mem::replace(&mut *active, next);
        match previous {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        let active = self.active.lock().unwrap_or_else(|err| err.into_inner());
        active
            .as_ref()
            .map(|timer| !timer.handle.is_finished())
            .unwrap_or(false)
    }

    pub fn interval(&self) -> Option<Duration> {
        let active = self.active.lock().unwrap_or_else(|err| err.into_inner());
        active.as_ref().map(|timer| timer.interval)
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.replace(None);
    }
}

pub const MAX_MONITORING_INTERVAL: Duration = Duration::from_secs(MAX_MONITORING_MINUTES * 60);

/// Starts polling for updates every `interval`, the first poll one interval
/// from now. A timer that is already running is cancelled first.
pub fn start_monitoring(session: &SessionController, interval: Duration) -> Result<(), AppError> {
    if interval.is_zero() {
        return session.fail(ClientError::validation("monitoring interval must be positive").into());
    }
    let first_poll = Instant::now()
        .checked_add(interval)
        .filter(|_| interval <= MAX_MONITORING_INTERVAL);
    let Some(first_poll) = first_poll else {
        return session.fail(ClientError::validation("monitoring interval too large").into());
    };

    let api = session.api.clone();
    let state = session.state.clone();
    let notices = session.notices.clone();
    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(first_poll, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(err) = poll_updates(api.as_ref(), &state, &notices).await {
                warn!("monitoring poll failed: {}", err);
            }
        }
    });

    let replaced = session.monitor.replace(Some(ActiveTimer { handle, interval }));
    if replaced {
        debug!("previous monitoring timer cancelled");
    }
    info!(interval_secs = interval.as_secs(), "monitoring started");
    session.notices.success(format!(
        "Monitoring started (every {})",
        describe_interval(interval)
    ));
    Ok(())
}

pub fn stop_monitoring(session: &SessionController) {
    if session.monitor.replace(None) {
        info!("monitoring stopped");
    }
    session.notices.info("Monitoring stopped");
}

pub fn is_monitoring(session: &SessionController) -> bool {
    session.monitor.is_active()
}

/// One poll of the update endpoint, outside the timer.
pub async fn check_for_updates(session: &SessionController) -> Result<UpdateStatus, AppError> {
    poll_updates(session.api.as_ref(), &session.state, &session.notices)
        .await
        .map_err(AppError::from)
}

async fn poll_updates(
    api: &dyn AnalysisApi,
    state: &Arc<RwLock<SessionState>>,
    notices: &NoticeBoard,
) -> Result<UpdateStatus, ClientError> {
    let token = state.read().await.token();
    let status = api.check_for_updates(token.as_deref()).await?;
    if status.updates_available {
        notices.info("New data available");
    } else {
        debug!("no updates available");
    }
    Ok(status)
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{} seconds", secs)
    }
}
