use tauri::menu::MenuBuilder;
use tauri::tray::TrayIconBuilder;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent};

use crate::app::SharedState;
use crate::shutdown;

const TRAY_ID: &str = "main-tray";
const TRAY_TOOLTIP: &str = "Event Window Alerter";
const MENU_ID_SHOW: &str = "tray-show";
const MENU_ID_EXIT: &str = "tray-exit";

const MAIN_WINDOW_LABEL: &str = "main";
const MAIN_WINDOW_TITLE: &str = "Event Window Alerter";
const MAIN_WIDTH: f64 = 250.0;
const MAIN_HEIGHT: f64 = 150.0;

pub fn setup_tray(app: &AppHandle) -> tauri::Result<()> {
    let menu = MenuBuilder::new(app)
        .text(MENU_ID_SHOW, "Show")
        .separator()
        .text(MENU_ID_EXIT, "Exit")
        .build()?;

    let _tray = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu)
        .show_menu_on_left_click(true)
        .on_menu_event(|app, event| match event.id().as_ref() {
            MENU_ID_SHOW => open_main_window(app),
            MENU_ID_EXIT => exit(app),
            _ => {}
        })
        .build(app)?;

    Ok(())
}

/// Open (or restore) the main window.
pub fn open_main_window(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.show();
        let _ = window.unminimize();
        let _ = window.set_focus();
        return;
    }

    let builder = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::App("index.html".into()))
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WIDTH, MAIN_HEIGHT)
        .center();

    match builder.build() {
        Ok(window) => {
            install_hide_to_tray_handlers(&window);
            let _ = window.set_focus();
        }
        Err(error) => {
            tracing::error!("Failed to open main window: {error}");
        }
    }
}

/// Minimizing or closing the main window hides it to the tray instead of
/// quitting; only the tray Exit entry terminates the process.
fn install_hide_to_tray_handlers(window: &WebviewWindow) {
    let tracked = window.clone();
    window.on_window_event(move |event| match event {
        WindowEvent::CloseRequested { api, .. } => {
            api.prevent_close();
            let _ = tracked.hide();
        }
        WindowEvent::Resized(_) => {
            if tracked.is_minimized().unwrap_or(false) {
                let _ = tracked.unminimize();
                let _ = tracked.hide();
            }
        }
        _ => {}
    });
}

fn exit(app: &AppHandle) {
    let state = app.state::<SharedState>().inner().clone();
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        shutdown::graceful_shutdown(&state).await;
        app.exit(0);
    });
}
