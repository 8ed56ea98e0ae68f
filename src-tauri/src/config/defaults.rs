//! Compiled-in defaults for the alerter.

/// Daily window opening times, listed in evaluation priority order.
pub const WINDOW_STARTS: &[&str] = &["01:00", "07:30", "12:00", "19:30", "22:30"];

/// Length of each active window, minutes.
pub const WINDOW_MINUTES: u32 = 30;

/// Pre-alert lead before each window opens, minutes (0 disables).
pub const PRE_LEAD_MINUTES: u32 = 2;

/// Wall-clock poll cadence, seconds.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Full fade duration, seconds.
pub const TRANSITION_SECS: f64 = 0.5;

/// Assumed display refresh rate; the windowing layer does not report one.
pub const REFRESH_HZ: f64 = 60.0;

/// Timezone the window times are defined in.
pub const TIMEZONE: &str = "Asia/Tokyo";

pub const ACTIVE_MESSAGE: &str = "Upgrade Fodder window open!";
pub const PRE_MESSAGE: &str = "A window is about to open!";
