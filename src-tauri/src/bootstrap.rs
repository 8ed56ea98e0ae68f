//! Startup wiring: configuration, engine construction, background tasks.

use alert_engine::{SystemClock, WindowSet};

use crate::app::SharedState;
use crate::background;
use crate::config::AppConfig;
use crate::notification;

/// Everything the application needs before the Tauri builder runs.
pub struct Foundation {
    pub config: AppConfig,
    pub schedule: WindowSet,
    pub clock: SystemClock,
}

/// Load configuration and build the evaluation engine (fatal on error).
///
/// The window literals and the timezone are compiled-in constants (with
/// env overrides), so a failure here is a configuration bug and startup
/// stops rather than limping along with a broken schedule.
pub fn init_foundation() -> Result<Foundation, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load()?;
    let schedule = WindowSet::parse(
        &config.window_starts,
        config.window_minutes,
        config.pre_lead_minutes,
    )?;
    let clock = SystemClock::from_name(&config.timezone)?;

    tracing::info!(
        windows = schedule.len(),
        timezone = %config.timezone,
        poll_interval_secs = config.poll_interval_secs,
        "Schedule loaded"
    );

    Ok(Foundation {
        config,
        schedule,
        clock,
    })
}

/// Spawn the background tasks. The notification worker is installed before
/// the poll loop starts so the first evaluation has somewhere to go.
pub fn spawn_background_tasks(app: &mut tauri::App, state: SharedState) {
    state.set_app_handle(app.handle().clone());

    let s = state.clone();
    tauri::async_runtime::spawn(async move {
        notification::worker::start_worker(s.clone()).await;
        background::poll_loop(s).await;
    });
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
