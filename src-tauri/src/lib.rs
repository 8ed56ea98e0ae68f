mod app;
mod background;
mod bootstrap;
mod config;
mod events;
mod notification;
mod shutdown;
mod tray;
mod window;

use alert_engine::{Clock, Phase};
use tracing_subscriber::EnvFilter;

#[tauri::command]
fn get_version() -> &'static str {
    "1.0.0"
}

/// Evaluate the schedule right now; used by the frontend for its initial
/// render before the first poll event arrives.
#[tauri::command]
fn current_phase(state: tauri::State<'_, app::SharedState>) -> Phase {
    state.schedule().evaluate(state.clock().now())
}

#[tauri::command]
fn alert_messages(state: tauri::State<'_, app::SharedState>) -> events::AlertMessages {
    let config = state.config();
    events::AlertMessages {
        pre: config.pre_message.clone(),
        regular: config.active_message.clone(),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let foundation = bootstrap::init_foundation().expect("Failed to initialize configuration");
    let shared_state = app::SharedState::new(foundation);
    let state_for_setup = shared_state.clone();

    tauri::Builder::default()
        .manage(shared_state)
        .setup(move |app| {
            tray::setup_tray(app.handle())?;
            tray::open_main_window(app.handle());
            bootstrap::spawn_background_tasks(app, state_for_setup);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_version,
            current_phase,
            alert_messages,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
