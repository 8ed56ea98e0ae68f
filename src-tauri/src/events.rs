//! Tauri emit event constants and payload types.
//!
//! These events are emitted from Rust to the frontend windows: the
//! notification popup renders the message and per-frame opacity, the main
//! window mirrors the current phase.

use alert_engine::{Phase, Visibility};
use serde::Serialize;

// -- Event name constants --

pub const ALERT_PHASE_CHANGED: &str = "alert_phase_changed";
pub const ALERT_MESSAGE: &str = "alert_message";
pub const ALERT_OPACITY: &str = "alert_opacity";

// -- Payload types --

#[derive(Debug, Clone, Serialize)]
pub struct PhasePayload {
    pub phase: Phase,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpacityPayload {
    pub opacity: f64,
    pub visibility: Visibility,
}

/// Both message variants, fetched once by the notification frontend.
#[derive(Debug, Clone, Serialize)]
pub struct AlertMessages {
    pub pre: String,
    pub regular: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The frontend matches on these string forms; keep them stable.
    #[test]
    fn phase_payload_serializes_lowercase() {
        let payload = serde_json::to_value(PhasePayload { phase: Phase::Pre }).unwrap();
        assert_eq!(payload, serde_json::json!({ "phase": "pre" }));
    }

    #[test]
    fn opacity_payload_serializes_snake_case_visibility() {
        let payload = serde_json::to_value(OpacityPayload {
            opacity: 0.5,
            visibility: Visibility::FadingIn,
        })
        .unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "opacity": 0.5, "visibility": "fading_in" })
        );
    }
}
