//! 提醒决策：每天最多一条提醒，优先级 里程碑 > 连续天数即将中断 > 今日目标未完成。

pub mod schedule;
pub mod settings;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::clock::Moment;
use crate::constants::{DEFAULT_SNOOZE_HOURS, DEFAULT_STREAK_AT_RISK_HOURS, DEFAULT_STREAK_MILESTONES};
use crate::stats::{StatsState, TodayProgress};

pub use schedule::{plan, sync_schedule, Alarm, AlarmBook, AlarmTrigger, NotificationScheduler};
pub use settings::{ReminderError, ReminderSettings, ReminderTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderDecision {
    None,
    GoalIncomplete,
    StreakAtRisk,
    StreakMilestone,
}

/// Tunable thresholds for [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub milestones: Vec<u32>,
    pub at_risk_hours: i64,
    pub snooze_hours: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            milestones: DEFAULT_STREAK_MILESTONES.to_vec(),
            at_risk_hours: DEFAULT_STREAK_AT_RISK_HOURS,
            snooze_hours: DEFAULT_SNOOZE_HOURS,
        }
    }
}

/// Picks the single reminder worth showing right now, if any.
///
/// `stats` is expected to be day-normalized, so a streak that already broke reads as zero.
pub fn decide(
    settings: &ReminderSettings,
    progress: &TodayProgress,
    stats: &StatsState,
    now: Moment,
    policy: &ReminderPolicy,
) -> ReminderDecision {
    let today = now.today();

    if !settings.enabled || settings.last_shown_date == Some(today) {
        return ReminderDecision::None;
    }
    if settings.snoozed_until.is_some_and(|until| now.utc < until) {
        return ReminderDecision::None;
    }

    let streak = stats.streak;
    let active_today = stats.last_date == Some(today);

    if streak > 0 && active_today && policy.milestones.contains(&streak) {
        return ReminderDecision::StreakMilestone;
    }

    if streak > 0 && !active_today {
        if let Some(midnight) = stats.last_date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
            let since_midnight = now.local - midnight;
            if since_midnight >= Duration::hours(policy.at_risk_hours) {
                return ReminderDecision::StreakAtRisk;
            }
        }
    }

    if progress.goal > 0 && progress.count < progress.goal {
        return ReminderDecision::GoalIncomplete;
    }

    ReminderDecision::None
}
