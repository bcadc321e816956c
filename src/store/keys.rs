use crate::catalog::Language;
use crate::store::StoreError;

pub const META_VERSION: &str = "_meta:version";

pub const STATS: &str = "stats";
pub const DAILY_GOAL: &str = "daily_goal";
pub const PREFERENCES: &str = "preferences";

pub const REMINDER_ENABLED: &str = "reminder:enabled";
pub const REMINDER_TIME: &str = "reminder:time";
pub const REMINDER_DAYS: &str = "reminder:days";
pub const REMINDER_LAST_SHOWN: &str = "reminder:last_shown_date";
pub const REMINDER_SNOOZED_UNTIL: &str = "reminder:snoozed_until";
pub const REMINDER_ALARM_IDS: &str = "reminder:alarm_ids";

/// Every reminder settings key, in the order they are read.
pub const REMINDER_SETTINGS: [&str; 5] = [
    REMINDER_ENABLED,
    REMINDER_TIME,
    REMINDER_DAYS,
    REMINDER_LAST_SHOWN,
    REMINDER_SNOOZED_UNTIL,
];

pub fn known_word_key(language: Language, term: &str) -> Result<String, StoreError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(StoreError::Validation("term must not be empty".to_string()));
    }
    Ok(format!("{}:{}", language.as_str(), term))
}

pub fn known_word_prefix(language: Language) -> String {
    format!("{}:", language.as_str())
}
