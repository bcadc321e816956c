//! 时钟抽象：所有跨日比较都基于设备本地日历日。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// A single reading of the clock, in both absolute and device-local terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub utc: DateTime<Utc>,
    pub local: NaiveDateTime,
}

impl Moment {
    /// Builds a moment whose local wall-clock equals UTC. Handy for tests.
    pub fn at_local(local: NaiveDateTime) -> Self {
        Self {
            utc: local.and_utc(),
            local,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.local.date()
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Moment;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        let local = Local::now();
        Moment {
            utc: local.with_timezone(&Utc),
            local: local.naive_local(),
        }
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    moment: std::sync::RwLock<Moment>,
}

impl FixedClock {
    pub fn new(moment: Moment) -> Self {
        Self {
            moment: std::sync::RwLock::new(moment),
        }
    }

    pub fn set(&self, moment: Moment) {
        if let Ok(mut guard) = self.moment.write() {
            *guard = moment;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.moment.write() {
            guard.utc += by;
            guard.local += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        match self.moment.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Formats a calendar day the way it is persisted (`YYYY-MM-DD`).
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parses a persisted calendar day; empty or malformed input yields `None`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
