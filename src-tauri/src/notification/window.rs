//! Notification popup window management.
//!
//! A borderless, always-on-top, single-line popup pinned to the
//! bottom-right of the primary monitor. The window itself only appears
//! and disappears at the fade edges; the per-frame opacity steps are
//! rendered by the frontend from emitted events.

use tauri::{AppHandle, Manager, PhysicalPosition, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::app::SharedState;
use crate::window::position;

const NOTIFICATION_WINDOW_LABEL: &str = "notification";
const NOTIFICATION_WINDOW_TITLE: &str = "Event Window Status";
const NOTIFICATION_WIDTH: f64 = 300.0;
const NOTIFICATION_HEIGHT: f64 = 54.0;

/// Show the popup, creating it on first use.
pub fn show(state: &SharedState) {
    let Some(app) = state.app_handle() else {
        tracing::warn!("Notification window requested before app handle was set");
        return;
    };

    if let Some(window) = app.get_webview_window(NOTIFICATION_WINDOW_LABEL) {
        let _ = window.show();
        return;
    }

    match build_window(&app) {
        Ok(window) => {
            position_bottom_right(&window);
            let _ = window.show();
        }
        Err(error) => {
            tracing::error!("Failed to create notification window: {error}");
        }
    }
}

/// Hide the popup once a fade-out has completed.
pub fn hide(state: &SharedState) {
    let Some(app) = state.app_handle() else {
        return;
    };
    if let Some(window) = app.get_webview_window(NOTIFICATION_WINDOW_LABEL) {
        let _ = window.hide();
    }
}

fn build_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    WebviewWindowBuilder::new(
        app,
        NOTIFICATION_WINDOW_LABEL,
        WebviewUrl::App("notification.html".into()),
    )
    .title(NOTIFICATION_WINDOW_TITLE)
    .inner_size(NOTIFICATION_WIDTH, NOTIFICATION_HEIGHT)
    .decorations(false)
    .resizable(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .focused(false)
    .visible(false)
    .build()
}

fn position_bottom_right(window: &WebviewWindow) {
    let monitor = match window.primary_monitor() {
        Ok(Some(m)) => m,
        Ok(None) => {
            tracing::warn!("No primary monitor reported, keeping default position");
            return;
        }
        Err(e) => {
            tracing::warn!("Monitor lookup failed: {e}");
            return;
        }
    };
    let size = match window.outer_size() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Window size lookup failed: {e}");
            return;
        }
    };

    let (x, y) = position::bottom_right(
        monitor.position().x,
        monitor.position().y,
        monitor.size().width,
        monitor.size().height,
        size.width,
        size.height,
    );
    if let Err(e) = window.set_position(PhysicalPosition::new(x, y)) {
        tracing::warn!("Failed to position notification window: {e}");
    }
}
