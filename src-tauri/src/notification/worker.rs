//! Notification presenter worker.
//!
//! Owns the fade presenter state machine. Phase evaluations arrive over a
//! channel from the poll loop; while a fade is in flight a frame interval
//! ticks the presenter at the configured refresh rate and pushes each
//! opacity step to the popup window. Single owner of presenter state, so
//! no locking around it.

use std::sync::LazyLock;

use alert_engine::{Directive, MessageKind, Phase, Presenter, Visibility};
use tokio::sync::{RwLock, mpsc};
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::app::SharedState;
use crate::events;

use super::window;

const CHANNEL_CAPACITY: usize = 16;

static PHASE_TX: LazyLock<RwLock<Option<mpsc::Sender<Phase>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Start the presenter worker.
pub async fn start_worker(state: SharedState) {
    let (tx, rx) = mpsc::channel::<Phase>(CHANNEL_CAPACITY);
    {
        let mut slot = PHASE_TX.write().await;
        *slot = Some(tx);
    }

    tauri::async_runtime::spawn(worker_loop(state, rx));
    tracing::info!("Notification presenter worker started");
}

/// Publish a phase evaluation to the worker.
pub async fn publish(phase: Phase) -> Result<(), String> {
    let tx_guard = PHASE_TX.read().await;
    let tx = tx_guard
        .as_ref()
        .ok_or_else(|| "Notification worker not initialized".to_string())?;

    tx.try_send(phase)
        .map_err(|e| format!("Notification channel full or closed: {e}"))?;

    Ok(())
}

/// Drop the channel sender to stop the worker loop.
pub async fn close() {
    let mut slot = PHASE_TX.write().await;
    *slot = None;
}

async fn worker_loop(state: SharedState, mut rx: mpsc::Receiver<Phase>) {
    let timing = state.config().fade_timing();
    let mut presenter = Presenter::new(timing);
    let mut frames: Option<Interval> = None;

    loop {
        tokio::select! {
            received = rx.recv() => {
                let Some(phase) = received else { break };
                match presenter.apply(phase) {
                    Directive::BeginTransition => {
                        if presenter.visibility() == Visibility::FadingIn {
                            window::show(&state);
                        }
                        emit_message(&state, &presenter);
                        emit_opacity(&state, &presenter);
                        if frames.is_none() {
                            let mut ticker = interval(timing.frame_period());
                            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                            // The first tick of a fresh interval completes
                            // immediately; push it one period out.
                            ticker.reset();
                            frames = Some(ticker);
                        }
                    }
                    Directive::UpdateMessage => emit_message(&state, &presenter),
                    Directive::None => {}
                }
            }
            _ = next_frame(frames.as_mut()), if frames.is_some() => {
                let in_flight = presenter.tick();
                emit_opacity(&state, &presenter);
                if !in_flight {
                    frames = None;
                    if presenter.visibility() == Visibility::Hidden {
                        window::hide(&state);
                    }
                }
            }
        }
    }

    tracing::info!("Notification presenter worker stopped");
}

async fn next_frame(frames: Option<&mut Interval>) {
    match frames {
        Some(ticker) => {
            ticker.tick().await;
        }
        // Disabled branch; never polled thanks to the select guard.
        None => std::future::pending::<()>().await,
    }
}

fn emit_message(state: &SharedState, presenter: &Presenter) {
    let Some(kind) = presenter.message() else {
        return;
    };
    let config = state.config();
    let text = match kind {
        MessageKind::Pre => config.pre_message.clone(),
        MessageKind::Regular => config.active_message.clone(),
    };
    state.emit_event(events::ALERT_MESSAGE, events::MessagePayload { text });
}

fn emit_opacity(state: &SharedState, presenter: &Presenter) {
    state.emit_event(
        events::ALERT_OPACITY,
        events::OpacityPayload {
            opacity: presenter.opacity(),
            visibility: presenter.visibility(),
        },
    );
}
