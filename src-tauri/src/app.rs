use std::sync::{Arc, RwLock};

use alert_engine::{SystemClock, WindowSet};
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio_util::sync::CancellationToken;

use crate::bootstrap::Foundation;
use crate::config::AppConfig;

/// Application shared state accessible from Tauri commands and background
/// tasks. Everything inside is immutable after startup except the
/// late-bound app handle.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Runtime configuration, fixed at load time.
    config: AppConfig,
    /// Daily windows in evaluation priority order.
    schedule: WindowSet,
    /// Wall clock pinned to the configured timezone.
    clock: SystemClock,
    /// Cancels all background loops on shutdown.
    shutdown: CancellationToken,
    /// Set once the Tauri app is built; used for frontend event emission.
    app_handle: RwLock<Option<AppHandle>>,
}

impl SharedState {
    pub fn new(foundation: Foundation) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config: foundation.config,
                schedule: foundation.schedule,
                clock: foundation.clock,
                shutdown: CancellationToken::new(),
                app_handle: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn schedule(&self) -> &WindowSet {
        &self.inner.schedule
    }

    pub fn clock(&self) -> &SystemClock {
        &self.inner.clock
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    pub fn set_app_handle(&self, handle: AppHandle) {
        if let Ok(mut slot) = self.inner.app_handle.write() {
            *slot = Some(handle);
        }
    }

    pub fn app_handle(&self) -> Option<AppHandle> {
        self.inner.app_handle.read().ok().and_then(|g| g.clone())
    }

    /// Emit an event to all frontend windows. A missing handle (startup,
    /// teardown) drops the event silently.
    pub fn emit_event<T: Serialize + Clone>(&self, name: &str, payload: T) {
        if let Some(handle) = self.app_handle() {
            if let Err(e) = handle.emit(name, payload) {
                tracing::warn!("Failed to emit {name}: {e}");
            }
        }
    }
}
