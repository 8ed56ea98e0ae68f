//! Recurring daily time windows and phase evaluation.
//!
//! Windows are stored as minute-of-day offsets so that a window whose
//! active or pre-alert period crosses midnight still evaluates correctly.
//! Evaluation only ever looks at the time-of-day of the supplied instant,
//! which is what makes every window recur each calendar day.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Configuration errors raised while building the schedule at startup.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid time literal {literal:?}, expected \"HH:MM\"")]
    InvalidTimeLiteral { literal: String },

    #[error("window duration must be between 1 and 1439 minutes, got {minutes}")]
    InvalidDuration { minutes: u32 },

    #[error("pre-alert lead must be shorter than a day, got {minutes} minutes")]
    InvalidPreLead { minutes: u32 },

    #[error("unknown timezone {name:?}")]
    UnknownTimezone { name: String },
}

/// Result of evaluating the window set at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No window is open or about to open.
    Idle,
    /// Inside some window's pre-alert lead.
    Pre,
    /// Inside some window's active period.
    Active,
}

/// One recurring daily interval plus an optional pre-alert lead.
///
/// Immutable once constructed. `start` is a minute-of-day offset parsed
/// from an `"HH:MM"` literal; the active period is `[start, start + duration)`
/// and the pre-alert period is `[start - pre_lead, start)`, both half-open
/// and wraparound-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_min: u32,
    duration_min: u32,
    pre_lead_min: u32,
}

impl TimeWindow {
    /// Parse a window from its `"HH:MM"` opening time.
    ///
    /// A malformed literal, a zero or day-long duration, or a day-long
    /// pre-alert lead is a configuration error. A lead of 0 disables the
    /// pre-alert period.
    pub fn parse(start: &str, duration_min: u32, pre_lead_min: u32) -> Result<Self, ScheduleError> {
        let start_min = parse_minute_of_day(start)?;
        if duration_min == 0 || duration_min >= MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidDuration {
                minutes: duration_min,
            });
        }
        if pre_lead_min >= MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidPreLead {
                minutes: pre_lead_min,
            });
        }
        Ok(Self {
            start_min,
            duration_min,
            pre_lead_min,
        })
    }

    /// True iff `now`'s time-of-day lies in `[start, end)`.
    pub fn is_active(&self, now: DateTime<Tz>) -> bool {
        contains(
            self.start_sec(),
            self.end_sec(),
            now.num_seconds_from_midnight(),
        )
    }

    /// True iff a pre-alert lead is configured and `now`'s time-of-day lies
    /// in `[pre_start, start)`.
    pub fn is_pre(&self, now: DateTime<Tz>) -> bool {
        if self.pre_lead_min == 0 {
            return false;
        }
        contains(
            self.pre_start_sec(),
            self.start_sec(),
            now.num_seconds_from_midnight(),
        )
    }

    fn start_sec(&self) -> u32 {
        self.start_min * 60
    }

    fn end_sec(&self) -> u32 {
        (self.start_min + self.duration_min) % MINUTES_PER_DAY * 60
    }

    fn pre_start_sec(&self) -> u32 {
        (self.start_min + MINUTES_PER_DAY - self.pre_lead_min) % MINUTES_PER_DAY * 60
    }
}

/// Half-open membership test on the circular day: `t ∈ [start, end)`,
/// where `end < start` means the interval wraps past midnight.
fn contains(start_sec: u32, end_sec: u32, t: u32) -> bool {
    if start_sec == end_sec {
        return false;
    }
    if start_sec < end_sec {
        t >= start_sec && t < end_sec
    } else {
        t >= start_sec || t < end_sec
    }
}

fn parse_minute_of_day(literal: &str) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeLiteral {
        literal: literal.to_string(),
    };
    let Some((h, m)) = literal.split_once(':') else {
        return Err(invalid());
    };
    let (Ok(hour), Ok(minute)) = (h.parse::<u32>(), m.parse::<u32>()) else {
        return Err(invalid());
    };
    if hour >= 24 || minute >= 60 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

/// Ordered collection of time windows; insertion order is evaluation
/// priority, so when two windows' periods overlap the first listed wins.
#[derive(Debug, Clone, Default)]
pub struct WindowSet {
    windows: Vec<TimeWindow>,
}

impl WindowSet {
    pub fn new(windows: Vec<TimeWindow>) -> Self {
        Self { windows }
    }

    /// Parse a list of `"HH:MM"` start literals sharing one duration and
    /// pre-alert lead. Fails on the first malformed entry.
    pub fn parse<S: AsRef<str>>(
        starts: &[S],
        duration_min: u32,
        pre_lead_min: u32,
    ) -> Result<Self, ScheduleError> {
        let windows = starts
            .iter()
            .map(|s| TimeWindow::parse(s.as_ref(), duration_min, pre_lead_min))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(windows))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Walk the windows in order, checking each window's pre-alert period
    /// before its active period; the first match wins.
    pub fn evaluate(&self, now: DateTime<Tz>) -> Phase {
        for window in &self.windows {
            if window.is_pre(now) {
                return Phase::Pre;
            }
            if window.is_active(now) {
                return Phase::Active;
            }
        }
        Phase::Idle
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia::Tokyo;

    use super::*;

    fn tokyo(h: u32, m: u32, s: u32) -> DateTime<Tz> {
        Tokyo.with_ymd_and_hms(2024, 5, 1, h, m, s).unwrap()
    }

    fn default_set() -> WindowSet {
        WindowSet::parse(&["01:00", "07:30", "12:00", "19:30", "22:30"], 30, 2).unwrap()
    }

    #[test]
    fn active_is_half_open_at_both_ends() {
        let w = TimeWindow::parse("01:00", 30, 2).unwrap();
        assert!(w.is_active(tokyo(1, 0, 0)));
        assert!(w.is_active(tokyo(1, 29, 59)));
        assert!(!w.is_active(tokyo(1, 30, 0)));
        assert!(!w.is_active(tokyo(0, 59, 59)));
    }

    #[test]
    fn pre_is_half_open_and_disjoint_from_active() {
        let w = TimeWindow::parse("01:00", 30, 2).unwrap();
        assert!(!w.is_pre(tokyo(0, 57, 59)));
        assert!(w.is_pre(tokyo(0, 58, 0)));
        assert!(w.is_pre(tokyo(0, 59, 59)));
        // At the opening instant the window is active, never pre.
        assert!(!w.is_pre(tokyo(1, 0, 0)));
    }

    #[test]
    fn zero_lead_disables_pre() {
        let w = TimeWindow::parse("01:00", 30, 0).unwrap();
        assert!(!w.is_pre(tokyo(0, 59, 0)));
    }

    #[test]
    fn default_schedule_scenario() {
        let set = default_set();
        assert_eq!(set.evaluate(tokyo(0, 58, 0)), Phase::Pre);
        assert_eq!(set.evaluate(tokyo(1, 0, 0)), Phase::Active);
        assert_eq!(set.evaluate(tokyo(1, 29, 59)), Phase::Active);
        assert_eq!(set.evaluate(tokyo(1, 30, 0)), Phase::Idle);
        assert_eq!(set.evaluate(tokyo(15, 0, 0)), Phase::Idle);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let set = default_set();
        let now = tokyo(7, 45, 12);
        assert_eq!(set.evaluate(now), set.evaluate(now));
    }

    #[test]
    fn list_order_breaks_overlap_ties() {
        // At 12:27 the first window is active (12:00-12:30) while the
        // second is in its pre period ([12:26, 12:28)).
        let set = WindowSet::parse(&["12:00", "12:28"], 30, 2).unwrap();
        assert_eq!(set.evaluate(tokyo(12, 27, 0)), Phase::Active);

        let reversed = WindowSet::parse(&["12:28", "12:00"], 30, 2).unwrap();
        assert_eq!(reversed.evaluate(tokyo(12, 27, 0)), Phase::Pre);
    }

    #[test]
    fn active_period_wraps_past_midnight() {
        let w = TimeWindow::parse("23:50", 30, 2).unwrap();
        assert!(w.is_active(tokyo(23, 55, 0)));
        assert!(w.is_active(tokyo(0, 10, 0)));
        assert!(!w.is_active(tokyo(0, 20, 0)));
        assert!(w.is_pre(tokyo(23, 48, 30)));
        assert!(!w.is_pre(tokyo(23, 50, 0)));
    }

    #[test]
    fn pre_period_wraps_past_midnight() {
        let w = TimeWindow::parse("00:01", 30, 2).unwrap();
        assert!(w.is_pre(tokyo(23, 59, 30)));
        assert!(w.is_pre(tokyo(0, 0, 30)));
        assert!(!w.is_pre(tokyo(0, 1, 0)));
        assert!(w.is_active(tokyo(0, 1, 0)));
    }

    #[test]
    fn pre_and_active_periods_are_disjoint_with_exact_lengths() {
        for start in ["01:00", "23:50", "00:01"] {
            let w = TimeWindow::parse(start, 30, 2).unwrap();
            let mut active = 0;
            let mut pre = 0;
            for minute in 0..MINUTES_PER_DAY {
                let now = tokyo(minute / 60, minute % 60, 0);
                assert!(
                    !(w.is_pre(now) && w.is_active(now)),
                    "overlap at minute {minute} for start {start}"
                );
                if w.is_active(now) {
                    active += 1;
                }
                if w.is_pre(now) {
                    pre += 1;
                }
            }
            assert_eq!(active, 30, "active minutes for start {start}");
            assert_eq!(pre, 2, "pre minutes for start {start}");
        }
    }

    #[test]
    fn malformed_literals_are_rejected() {
        for literal in ["", "12", "12:", ":30", "25:00", "12:60", "12-30", "a:b"] {
            assert!(
                TimeWindow::parse(literal, 30, 2).is_err(),
                "expected {literal:?} to be rejected"
            );
        }
    }

    #[test]
    fn degenerate_durations_are_rejected() {
        assert!(TimeWindow::parse("12:00", 0, 2).is_err());
        assert!(TimeWindow::parse("12:00", MINUTES_PER_DAY, 2).is_err());
        assert!(TimeWindow::parse("12:00", 30, MINUTES_PER_DAY).is_err());
    }

    #[test]
    fn empty_set_is_always_idle() {
        let set = WindowSet::default();
        assert!(set.is_empty());
        assert_eq!(set.evaluate(tokyo(12, 0, 0)), Phase::Idle);
    }
}
