pub mod known_words;
pub mod kv;
pub mod preferences;
pub mod reminders;
pub mod stats;
