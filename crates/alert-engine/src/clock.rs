//! Clock source abstraction.
//!
//! Evaluation is driven by an injected clock rather than `Utc::now()`
//! calls so tests can pin the instant.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::schedule::ScheduleError;

/// Source of the current instant in the configured timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Wall clock pinned to a fixed named timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Resolve a named timezone. Unknown names are a configuration error
    /// reported at startup.
    pub fn from_name(name: &str) -> Result<Self, ScheduleError> {
        let tz = name.parse::<Tz>().map_err(|_| ScheduleError::UnknownTimezone {
            name: name.to_string(),
        })?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_timezone() {
        let clock = SystemClock::from_name("Asia/Tokyo").unwrap();
        assert_eq!(clock.timezone().name(), "Asia/Tokyo");
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(matches!(
            SystemClock::from_name("Not/AZone"),
            Err(ScheduleError::UnknownTimezone { .. })
        ));
    }
}
