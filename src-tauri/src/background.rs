//! Background task loops: wall-clock polling against the window schedule.

use std::time::Duration;

use alert_engine::{Clock, Phase};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;
use crate::events;
use crate::notification;

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Periodically evaluate the window schedule and feed the presenter.
///
/// The first evaluation happens immediately so a window that is already
/// open at launch shows its alert without waiting a full poll interval.
pub async fn poll_loop(state: SharedState) {
    let shutdown_token = state.shutdown_token().clone();
    let interval = Duration::from_secs(state.config().poll_interval_secs);
    let mut last_phase: Option<Phase> = None;

    loop {
        let now = state.clock().now();
        let phase = state.schedule().evaluate(now);

        if last_phase != Some(phase) {
            tracing::info!(?phase, time = %now.format("%H:%M:%S"), "Window phase changed");
            state.emit_event(events::ALERT_PHASE_CHANGED, events::PhasePayload { phase });
            last_phase = Some(phase);
        } else {
            tracing::debug!(?phase, "Window phase unchanged");
        }

        if let Err(e) = notification::worker::publish(phase).await {
            tracing::warn!("Failed to publish phase to notification worker: {e}");
        }

        if sleep_or_cancel(&shutdown_token, interval).await {
            tracing::info!("Poll loop stopped (shutdown)");
            return;
        }
    }
}
