use std::time::Duration;

use tokio::time::sleep;

use crate::app::SharedState;
use crate::notification;

pub async fn graceful_shutdown(state: &SharedState) {
    tracing::info!("Shutdown sequence started");

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: background loops cancelled");

    notification::worker::close().await;
    tracing::info!("Shutdown: notification worker closed");

    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
