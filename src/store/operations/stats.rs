use crate::constants::{DEFAULT_DAILY_GOAL, MAX_DAILY_GOAL};
use crate::stats::StatsState;
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    /// Persisted stats snapshot, or zeroed stats when absent or unreadable.
    pub fn load_stats(&self) -> StatsState {
        self.read_or_warn(keys::STATS, Self::deserialize::<StatsState>)
            .unwrap_or_default()
    }

    pub fn save_stats(&self, stats: &StatsState) -> Result<(), StoreError> {
        self.set(keys::STATS, &Self::serialize(stats)?)
    }

    pub fn load_daily_goal(&self) -> u32 {
        self.read_or_warn(keys::DAILY_GOAL, parse_goal)
            .unwrap_or(DEFAULT_DAILY_GOAL)
    }

    pub fn save_daily_goal(&self, goal: u32) -> Result<(), StoreError> {
        self.set(keys::DAILY_GOAL, &goal.to_string())
    }
}

pub(crate) fn parse_goal(raw: &str) -> Result<u32, StoreError> {
    match raw.trim().parse::<u32>() {
        Ok(goal) if (1..=MAX_DAILY_GOAL).contains(&goal) => Ok(goal),
        _ => Err(StoreError::Validation(format!("invalid daily goal: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::temp_store;

    #[test]
    fn stats_snapshot_persists() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_stats(), StatsState::default());

        let stats = StatsState {
            total_answered: 3,
            total_correct: 2,
            total_wrong: 1,
            accuracy: 67,
            streak: 4,
            last_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            ..StatsState::default()
        };
        store.save_stats(&stats).unwrap();
        assert_eq!(store.load_stats(), stats);
    }

    #[test]
    fn corrupt_values_fall_back_to_defaults() {
        let (_dir, store) = temp_store();
        store.set(keys::STATS, "{not json").unwrap();
        store.set(keys::DAILY_GOAL, "0").unwrap();
        assert_eq!(store.load_stats(), StatsState::default());
        assert_eq!(store.load_daily_goal(), DEFAULT_DAILY_GOAL);

        store.save_daily_goal(50).unwrap();
        assert_eq!(store.load_daily_goal(), 50);
    }

    #[test]
    fn partial_snapshot_fills_missing_fields() {
        let (_dir, store) = temp_store();
        store.set(keys::STATS, r#"{"streak":2,"lastDate":"2026-02-01"}"#).unwrap();
        let stats = store.load_stats();
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.total_answered, 0);
    }
}
