use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE, MAX_SNOOZE_HOURS, REMINDER_FIRST_HOUR,
    REMINDER_LAST_HOUR, REMINDER_MINUTE_STEP,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("reminder time must be a HH:MM preset between 06:00 and 23:30: {0}")]
    InvalidTime(String),
    #[error("weekday out of range (0 = Sunday .. 6 = Saturday): {0}")]
    InvalidDay(u8),
    #[error("snooze must be between 1 and 24 hours: {0}")]
    InvalidSnooze(i64),
}

/// One of the half-hour presets between 06:00 and 23:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ReminderError> {
        let in_range = (REMINDER_FIRST_HOUR..=REMINDER_LAST_HOUR).contains(&hour);
        if !in_range || minute % REMINDER_MINUTE_STEP != 0 || minute >= 60 {
            return Err(ReminderError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Every selectable preset, earliest first.
    pub fn presets() -> Vec<ReminderTime> {
        (REMINDER_FIRST_HOUR..=REMINDER_LAST_HOUR)
            .flat_map(|hour| {
                (0..60)
                    .step_by(REMINDER_MINUTE_STEP as usize)
                    .map(move |minute| ReminderTime { hour, minute })
            })
            .collect()
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self {
            hour: DEFAULT_REMINDER_HOUR,
            minute: DEFAULT_REMINDER_MINUTE,
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReminderError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ReminderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    pub time: ReminderTime,
    /// Weekdays, 0 = Sunday. Empty means every day.
    pub days: Vec<u8>,
    pub last_shown_date: Option<NaiveDate>,
    pub snoozed_until: Option<DateTime<Utc>>,
}

impl ReminderSettings {
    /// Validates, sorts and dedups the selected weekdays.
    pub fn set_days(&mut self, days: &[u8]) -> Result<(), ReminderError> {
        if let Some(&bad) = days.iter().find(|&&d| d > 6) {
            return Err(ReminderError::InvalidDay(bad));
        }
        let mut days = days.to_vec();
        days.sort_unstable();
        days.dedup();
        self.days = days;
        Ok(())
    }

    pub fn is_daily(&self) -> bool {
        self.days.is_empty() || self.days.len() == 7
    }

    pub fn dismiss_for_today(&mut self, today: NaiveDate) {
        self.last_shown_date = Some(today);
    }

    pub fn snooze(&mut self, now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>, ReminderError> {
        if !(1..=MAX_SNOOZE_HOURS).contains(&hours) {
            return Err(ReminderError::InvalidSnooze(hours));
        }
        let until = now + Duration::hours(hours);
        self.snoozed_until = Some(until);
        Ok(until)
    }
}
