//! Runtime application configuration loaded from defaults + environment overrides.

use alert_engine::FadeTiming;

use super::defaults;

/// Runtime configuration, threaded through the app at construction and
/// never mutated afterwards. Values that affect the schedule itself
/// (window literals, timezone) are validated by the bootstrap when the
/// engine is built.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub timezone: String,
    pub window_starts: Vec<String>,
    pub window_minutes: u32,
    pub pre_lead_minutes: u32,
    pub poll_interval_secs: u64,
    pub transition_secs: f64,
    pub refresh_hz: f64,
    pub pre_message: String,
    pub active_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: defaults::TIMEZONE.into(),
            window_starts: defaults::WINDOW_STARTS.iter().map(|s| s.to_string()).collect(),
            window_minutes: defaults::WINDOW_MINUTES,
            pre_lead_minutes: defaults::PRE_LEAD_MINUTES,
            poll_interval_secs: defaults::POLL_INTERVAL_SECS,
            transition_secs: defaults::TRANSITION_SECS,
            refresh_hz: defaults::REFRESH_HZ,
            pre_message: defaults::PRE_MESSAGE.into(),
            active_message: defaults::ACTIVE_MESSAGE.into(),
        }
    }
}

impl AppConfig {
    /// Build from defaults, then apply `EVENT_ALERTER_*` env overrides.
    ///
    /// A malformed numeric override falls back to its default rather than
    /// failing; the schedule-defining values are checked later by the
    /// bootstrap, where a bad value is fatal.
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("EVENT_ALERTER_TIMEZONE") {
            if !v.is_empty() {
                config.timezone = v;
            }
        }
        if let Ok(v) = std::env::var("EVENT_ALERTER_WINDOW_STARTS") {
            if let Some(starts) = split_start_list(&v) {
                config.window_starts = starts;
            }
        }
        config.poll_interval_secs = positive_u64_or(
            std::env::var("EVENT_ALERTER_POLL_INTERVAL_SECS").ok(),
            config.poll_interval_secs,
        );
        config.refresh_hz = positive_f64_or(
            std::env::var("EVENT_ALERTER_REFRESH_HZ").ok(),
            config.refresh_hz,
        );

        Ok(config)
    }

    /// Frame budget for the presenter, from the configured refresh rate
    /// and transition duration.
    pub fn fade_timing(&self) -> FadeTiming {
        FadeTiming {
            refresh_hz: self.refresh_hz,
            transition_secs: self.transition_secs,
        }
    }
}

fn split_start_list(raw: &str) -> Option<Vec<String>> {
    let starts: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if starts.is_empty() { None } else { Some(starts) }
}

fn positive_u64_or(raw: Option<String>, default: u64) -> u64 {
    match raw.as_deref().map(str::parse::<u64>) {
        Some(Ok(v)) if v > 0 => v,
        _ => default,
    }
}

fn positive_f64_or(raw: Option<String>, default: f64) -> f64 {
    match raw.as_deref().map(str::parse::<f64>) {
        Some(Ok(v)) if v > 0.0 => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use alert_engine::{SystemClock, WindowSet};

    use super::*;

    #[test]
    fn defaults_build_a_valid_engine() {
        let config = AppConfig::default();
        let schedule = WindowSet::parse(
            &config.window_starts,
            config.window_minutes,
            config.pre_lead_minutes,
        )
        .unwrap();
        assert_eq!(schedule.len(), 5);
        assert!(SystemClock::from_name(&config.timezone).is_ok());
        assert_eq!(config.fade_timing().target_frames(), 30);
    }

    #[test]
    fn malformed_numeric_overrides_fall_back() {
        assert_eq!(positive_u64_or(Some("abc".into()), 30), 30);
        assert_eq!(positive_u64_or(Some("0".into()), 30), 30);
        assert_eq!(positive_u64_or(Some("45".into()), 30), 45);
        assert_eq!(positive_f64_or(Some("-1".into()), 60.0), 60.0);
        assert_eq!(positive_f64_or(Some("144".into()), 60.0), 144.0);
        assert_eq!(positive_f64_or(None, 60.0), 60.0);
    }

    #[test]
    fn start_list_override_splits_and_trims() {
        assert_eq!(
            split_start_list("01:00, 07:30 ,12:00"),
            Some(vec!["01:00".into(), "07:30".into(), "12:00".into()])
        );
        assert_eq!(split_start_list(" , "), None);
        assert_eq!(split_start_list(""), None);
    }
}
