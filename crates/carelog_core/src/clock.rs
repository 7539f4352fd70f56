//! Time source used when a medication is marked taken without an explicit
//! timestamp.

use chrono::{SecondsFormat, Utc};

/// Produces the timestamp string stored in `last_taken_time`.
pub trait Clock {
    fn now_timestamp(&self) -> String;
}

/// Wall clock, RFC 3339 in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn now_timestamp(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};
    use chrono::DateTime;

    #[test]
    fn system_clock_emits_parseable_utc_timestamp() {
        let stamp = SystemClock.now_timestamp();
        assert!(stamp.ends_with('Z'), "unexpected timestamp: {stamp}");
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn fixed_clock_is_constant() {
        let clock = FixedClock::new("08:00");
        assert_eq!(clock.now_timestamp(), "08:00");
        assert_eq!(clock.now_timestamp(), "08:00");
    }
}
