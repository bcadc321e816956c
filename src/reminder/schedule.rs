//! 提醒闹钟计划：把提醒设置展开为每日/每周触发器，并在设置变化时对账。

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reminder::ReminderSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AlarmTrigger {
    Daily { hour: u8, minute: u8 },
    /// `weekday`: 0 = Sunday .. 6 = Saturday.
    Weekly { weekday: u8, hour: u8, minute: u8 },
}

/// Platform hook that owns recurring alarms. Delivery is up to the implementor.
pub trait NotificationScheduler: Send + Sync {
    fn schedule_daily(&self, hour: u8, minute: u8) -> String;
    fn schedule_weekly(&self, weekday: u8, hour: u8, minute: u8) -> String;
    fn cancel(&self, id: &str) -> bool;
}

/// Triggers that should exist for `settings`; empty when reminders are off.
pub fn plan(settings: &ReminderSettings) -> Vec<AlarmTrigger> {
    if !settings.enabled {
        return Vec::new();
    }
    let (hour, minute) = (settings.time.hour(), settings.time.minute());
    if settings.is_daily() {
        return vec![AlarmTrigger::Daily { hour, minute }];
    }
    settings
        .days
        .iter()
        .map(|&weekday| AlarmTrigger::Weekly {
            weekday,
            hour,
            minute,
        })
        .collect()
}

/// Cancels `previous_ids` and schedules the current plan, returning the new ids.
pub fn sync_schedule(
    scheduler: &dyn NotificationScheduler,
    settings: &ReminderSettings,
    previous_ids: &[String],
) -> Vec<String> {
    for id in previous_ids {
        if !scheduler.cancel(id) {
            tracing::debug!(alarm_id = %id, "Stale alarm already gone");
        }
    }

    let ids: Vec<String> = plan(settings)
        .into_iter()
        .map(|trigger| match trigger {
            AlarmTrigger::Daily { hour, minute } => scheduler.schedule_daily(hour, minute),
            AlarmTrigger::Weekly {
                weekday,
                hour,
                minute,
            } => scheduler.schedule_weekly(weekday, hour, minute),
        })
        .collect();

    tracing::info!(
        cancelled = previous_ids.len(),
        scheduled = ids.len(),
        enabled = settings.enabled,
        "Reminder alarms synced"
    );
    ids
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: String,
    #[serde(flatten)]
    pub trigger: AlarmTrigger,
    pub created_at: DateTime<Utc>,
}

/// In-process scheduler; the client reads it and mirrors the alarms locally.
#[derive(Debug, Default)]
pub struct AlarmBook {
    alarms: Mutex<BTreeMap<String, Alarm>>,
}

impl AlarmBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Alarm> {
        let alarms = match self.alarms.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut list: Vec<Alarm> = alarms.values().cloned().collect();
        list.sort_by_key(|a| a.trigger_order());
        list
    }

    /// Re-registers alarms restored from the store under their existing ids.
    pub fn restore(&self, ids: &[String], settings: &ReminderSettings) -> Vec<String> {
        let triggers = plan(settings);
        if ids.len() != triggers.len() {
            return sync_schedule(self, settings, ids);
        }
        let mut alarms = match self.alarms.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (id, trigger) in ids.iter().zip(triggers) {
            alarms.insert(
                id.clone(),
                Alarm {
                    id: id.clone(),
                    trigger,
                    created_at: Utc::now(),
                },
            );
        }
        ids.to_vec()
    }

    fn insert(&self, trigger: AlarmTrigger) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let alarm = Alarm {
            id: id.clone(),
            trigger,
            created_at: Utc::now(),
        };
        match self.alarms.lock() {
            Ok(mut guard) => guard.insert(id.clone(), alarm),
            Err(poisoned) => poisoned.into_inner().insert(id.clone(), alarm),
        };
        id
    }
}

impl Alarm {
    fn trigger_order(&self) -> (u8, u8, u8) {
        match self.trigger {
            AlarmTrigger::Daily { hour, minute } => (0, hour, minute),
            AlarmTrigger::Weekly {
                weekday,
                hour,
                minute,
            } => (weekday + 1, hour, minute),
        }
    }
}

impl NotificationScheduler for AlarmBook {
    fn schedule_daily(&self, hour: u8, minute: u8) -> String {
        self.insert(AlarmTrigger::Daily { hour, minute })
    }

    fn schedule_weekly(&self, weekday: u8, hour: u8, minute: u8) -> String {
        self.insert(AlarmTrigger::Weekly {
            weekday,
            hour,
            minute,
        })
    }

    fn cancel(&self, id: &str) -> bool {
        match self.alarms.lock() {
            Ok(mut guard) => guard.remove(id).is_some(),
            Err(poisoned) => poisoned.into_inner().remove(id).is_some(),
        }
    }
}
