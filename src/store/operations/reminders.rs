use chrono::{DateTime, Utc};

use crate::clock::{format_day, parse_day};
use crate::reminder::{ReminderSettings, ReminderTime};
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    /// Reads each reminder field independently; a bad field falls back to its own default.
    pub fn load_reminder_settings(&self) -> ReminderSettings {
        let values = match self.multi_get(&keys::REMINDER_SETTINGS) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "Reminder settings unreadable, using defaults");
                return ReminderSettings::default();
            }
        };
        let mut settings = ReminderSettings::default();
        let field = |i: usize| values.get(i).and_then(|v| v.as_deref());

        if let Some(raw) = field(0) {
            match raw {
                "true" => settings.enabled = true,
                "false" => settings.enabled = false,
                other => warn_field(keys::REMINDER_ENABLED, other),
            }
        }
        if let Some(raw) = field(1) {
            match raw.parse::<ReminderTime>() {
                Ok(time) => settings.time = time,
                Err(_) => warn_field(keys::REMINDER_TIME, raw),
            }
        }
        if let Some(raw) = field(2) {
            let applied = match serde_json::from_str::<Vec<u8>>(raw) {
                Ok(days) => settings.set_days(&days).is_ok(),
                Err(_) => false,
            };
            if !applied {
                warn_field(keys::REMINDER_DAYS, raw);
            }
        }
        if let Some(raw) = field(3) {
            match parse_day(raw) {
                Some(day) => settings.last_shown_date = Some(day),
                None => warn_field(keys::REMINDER_LAST_SHOWN, raw),
            }
        }
        if let Some(raw) = field(4) {
            match DateTime::parse_from_rfc3339(raw) {
                Ok(until) => settings.snoozed_until = Some(until.with_timezone(&Utc)),
                Err(_) => warn_field(keys::REMINDER_SNOOZED_UNTIL, raw),
            }
        }

        settings
    }

    /// One key per field; cleared optional fields are removed in the same batch.
    pub fn save_reminder_settings(&self, settings: &ReminderSettings) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        batch.insert(keys::REMINDER_ENABLED, settings.enabled.to_string().as_bytes());
        batch.insert(keys::REMINDER_TIME, settings.time.to_string().as_bytes());
        batch.insert(keys::REMINDER_DAYS, Self::serialize(&settings.days)?.as_bytes());
        match settings.last_shown_date {
            Some(day) => batch.insert(keys::REMINDER_LAST_SHOWN, format_day(day).as_bytes()),
            None => batch.remove(keys::REMINDER_LAST_SHOWN),
        }
        match settings.snoozed_until {
            Some(until) => batch.insert(keys::REMINDER_SNOOZED_UNTIL, until.to_rfc3339().as_bytes()),
            None => batch.remove(keys::REMINDER_SNOOZED_UNTIL),
        }
        self.kv.apply_batch(batch)?;
        Ok(())
    }

    pub fn load_alarm_ids(&self) -> Vec<String> {
        self.read_or_warn(keys::REMINDER_ALARM_IDS, Self::deserialize::<Vec<String>>)
            .unwrap_or_default()
    }

    pub fn save_alarm_ids(&self, ids: &[String]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return self.remove(keys::REMINDER_ALARM_IDS);
        }
        self.set(keys::REMINDER_ALARM_IDS, &Self::serialize(&ids)?)
    }
}

fn warn_field(key: &str, raw: &str) {
    tracing::warn!(key, value = raw, "Reminder field unreadable, using default");
}
