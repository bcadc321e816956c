use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_SNOOZE_HOURS, DEFAULT_STREAK_AT_RISK_HOURS, DEFAULT_STREAK_MILESTONES, MAX_RETRY_GAP,
    MAX_SNOOZE_HOURS, MIN_RETRY_GAP,
};
use crate::logging::LogConfig;
use crate::reminder::ReminderPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub quiz: QuizConfig,
    pub reminder: ReminderPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub min_retry_gap: usize,
    pub max_retry_gap: usize,
    /// 跳过的单词是否按答错处理、稍后重新出现
    pub requeue_skipped: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            min_retry_gap: MIN_RETRY_GAP,
            max_retry_gap: MAX_RETRY_GAP,
            requeue_skipped: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut min_retry_gap = env_or_parse("QUIZ_MIN_RETRY_GAP", MIN_RETRY_GAP);
        if min_retry_gap == 0 {
            tracing::warn!("QUIZ_MIN_RETRY_GAP must be at least 1, raising it");
            min_retry_gap = 1;
        }
        let mut max_retry_gap = env_or_parse("QUIZ_MAX_RETRY_GAP", MAX_RETRY_GAP);
        if max_retry_gap < min_retry_gap {
            tracing::warn!(
                min_retry_gap,
                max_retry_gap,
                "QUIZ_MAX_RETRY_GAP below QUIZ_MIN_RETRY_GAP, raising it"
            );
            max_retry_gap = min_retry_gap;
        }

        let mut snooze_hours = env_or_parse("REMINDER_SNOOZE_HOURS", DEFAULT_SNOOZE_HOURS);
        if !(1..=MAX_SNOOZE_HOURS).contains(&snooze_hours) {
            tracing::warn!(snooze_hours, "REMINDER_SNOOZE_HOURS out of range, using default");
            snooze_hours = DEFAULT_SNOOZE_HOURS;
        }

        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/vocab-drill.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:8081"),
            quiz: QuizConfig {
                min_retry_gap,
                max_retry_gap,
                requeue_skipped: env_or_bool("QUIZ_REQUEUE_SKIPPED", false),
            },
            reminder: ReminderPolicy {
                milestones: env_or_list("STREAK_MILESTONES", DEFAULT_STREAK_MILESTONES),
                at_risk_hours: env_or_parse("STREAK_AT_RISK_HOURS", DEFAULT_STREAK_AT_RISK_HOURS),
                snooze_hours,
            },
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            enable_file_logs: self.enable_file_logs,
            log_dir: self.log_dir.clone(),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Comma-separated list; any unparsable item rejects the whole value.
pub fn env_or_list<T>(key: &str, default: &[T]) -> Vec<T>
where
    T: FromStr + Clone,
{
    let Ok(raw) = env::var(key) else {
        return default.to_vec();
    };
    let parsed: Result<Vec<T>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse::<T>)
        .collect();
    match parsed {
        Ok(items) if !items.is_empty() => items,
        _ => {
            tracing::warn!(key, value = %raw, "Failed to parse env list, using default");
            default.to_vec()
        }
    }
}
