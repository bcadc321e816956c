//! 练习会话：单个学习者的全部内存状态，所有状态转换都在 AppState 的互斥锁内执行。
//!
//! 内存先更新，随后把持久化操作交给 StoreWriter 排队，请求不等待落盘。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogSet, Category, Language, WordEntry};
use crate::clock::Moment;
use crate::config::QuizConfig;
use crate::constants::MAX_DAILY_GOAL;
use crate::quiz::{
    is_valid_options_count, AnswerOutcome, Direction, QuizScheduler, QuizSettings, QuizView,
    RetryPolicy,
};
use crate::reminder::{
    decide, sync_schedule, NotificationScheduler, ReminderDecision, ReminderError, ReminderPolicy,
    ReminderSettings, ReminderTime,
};
use crate::stats::{reduce, StatsAction, StatsState, TodayProgress};
use crate::store::operations::preferences::Preferences;
use crate::store::{Store, StoreWriter, WriteOp};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("options count must be one of 4, 6 or 8: {0}")]
    InvalidOptionsCount(usize),
    #[error("daily goal must be between 1 and {max}: {goal}")]
    InvalidDailyGoal { goal: u32, max: u32 },
    #[error("word not in {language} catalog: {term}")]
    UnknownTerm { language: Language, term: String },
    #[error(transparent)]
    Reminder(#[from] ReminderError),
}

/// Partial preferences update; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub language: Option<Language>,
    /// `Some(None)` clears the category filter.
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<Category>>,
    pub direction: Option<Direction>,
    pub options_count: Option<usize>,
    pub daily_goal: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    pub enabled: Option<bool>,
    pub time: Option<String>,
    pub days: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesView {
    #[serde(flatten)]
    pub preferences: Preferences,
    pub daily_goal: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: StatsState,
    pub today: TodayProgress,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordView {
    #[serde(flatten)]
    pub entry: WordEntry,
    pub known: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionView {
    pub decision: ReminderDecision,
    pub streak: u32,
    pub today: TodayProgress,
}

pub struct DrillSession {
    catalogs: CatalogSet,
    quiz: QuizScheduler,
    requeue_skipped: bool,
    stats: StatsState,
    daily_goal: u32,
    preferences: Preferences,
    known: HashMap<Language, HashSet<String>>,
    reminders: ReminderSettings,
    alarm_ids: Vec<String>,
    policy: ReminderPolicy,
    writer: StoreWriter,
    scheduler: Arc<dyn NotificationScheduler>,
}

impl DrillSession {
    /// Builds the session from persisted state. Stored values that are missing or unreadable
    /// have already been replaced with defaults by the store.
    pub fn load(
        store: &Store,
        catalogs: CatalogSet,
        quiz_config: &QuizConfig,
        policy: ReminderPolicy,
        writer: StoreWriter,
        scheduler: Arc<dyn NotificationScheduler>,
        now: Moment,
    ) -> Self {
        let preferences = store.load_preferences();
        let stats = store.load_stats().normalized(now.today());
        let known: HashMap<Language, HashSet<String>> = Language::ALL
            .iter()
            .map(|&lang| (lang, store.load_known_words(lang)))
            .collect();

        let retry = RetryPolicy::new(quiz_config.min_retry_gap, quiz_config.max_retry_gap);
        let settings = quiz_settings(&preferences, quiz_config.requeue_skipped);
        let catalog = Arc::clone(catalogs.get(preferences.language));
        let quiz = QuizScheduler::new(
            catalog,
            settings,
            retry,
            known.get(&preferences.language).unwrap_or(&HashSet::new()),
        );

        tracing::info!(
            language = %preferences.language,
            streak = stats.streak,
            total = stats.total_answered,
            "Drill session loaded"
        );

        Self {
            catalogs,
            quiz,
            requeue_skipped: quiz_config.requeue_skipped,
            stats,
            daily_goal: store.load_daily_goal(),
            preferences,
            known,
            reminders: store.load_reminder_settings(),
            alarm_ids: store.load_alarm_ids(),
            policy,
            writer,
            scheduler,
        }
    }

    pub fn alarm_ids(&self) -> &[String] {
        &self.alarm_ids
    }

    /// Replaces the alarm ids, e.g. after the scheduler restored them at startup.
    pub fn set_alarm_ids(&mut self, ids: Vec<String>) {
        if ids != self.alarm_ids {
            self.writer.enqueue(WriteOp::AlarmIds(ids.clone()));
        }
        self.alarm_ids = ids;
    }

    // ---- quiz ----

    pub fn quiz_view(&self) -> QuizView {
        self.quiz.view()
    }

    pub fn answer(&mut self, candidate: &str, now: Moment) -> AnswerOutcome {
        let outcome = self.quiz.select_answer(candidate);
        if let AnswerOutcome::Recorded { is_correct, .. } = outcome {
            self.apply_stats(StatsAction::AddResult { is_correct }, now);
        }
        outcome
    }

    pub fn advance(&mut self) -> bool {
        self.quiz.advance()
    }

    pub fn skip(&mut self) -> bool {
        self.quiz.skip()
    }

    pub fn hint(&mut self) -> bool {
        self.quiz.reveal_hint()
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
    }

    // ---- stats ----

    pub fn stats_view(&self, now: Moment) -> StatsView {
        let today = now.today();
        let stats = self.stats.normalized(today);
        StatsView {
            today: stats.today_progress(today, self.daily_goal),
            stats,
        }
    }

    pub fn reset_stats(&mut self, now: Moment) {
        self.apply_stats(StatsAction::Reset, now);
        tracing::info!("Stats reset");
    }

    pub fn set_streak_mode(&mut self, correct_only: bool, now: Moment) {
        self.apply_stats(StatsAction::SetStreakMode { correct_only }, now);
    }

    fn apply_stats(&mut self, action: StatsAction, now: Moment) {
        let current = std::mem::take(&mut self.stats);
        self.stats = reduce(current, action, now.today());
        self.writer.enqueue(WriteOp::Stats(self.stats.clone()));
    }

    // ---- preferences & words ----

    pub fn preferences_view(&self) -> PreferencesView {
        PreferencesView {
            preferences: self.preferences.clone(),
            daily_goal: self.daily_goal,
        }
    }

    /// Validates the whole update before applying any of it.
    pub fn update_preferences(&mut self, update: PreferencesUpdate) -> Result<(), SessionError> {
        if let Some(count) = update.options_count {
            if !is_valid_options_count(count) {
                return Err(SessionError::InvalidOptionsCount(count));
            }
        }
        if let Some(goal) = update.daily_goal {
            if goal == 0 || goal > MAX_DAILY_GOAL {
                return Err(SessionError::InvalidDailyGoal {
                    goal,
                    max: MAX_DAILY_GOAL,
                });
            }
        }

        if let Some(goal) = update.daily_goal {
            if goal != self.daily_goal {
                self.daily_goal = goal;
                self.writer.enqueue(WriteOp::DailyGoal(goal));
            }
        }

        let before = self.preferences.clone();
        if let Some(language) = update.language {
            self.preferences.language = language;
        }
        if let Some(category) = update.category {
            self.preferences.category = category;
        }
        if let Some(direction) = update.direction {
            self.preferences.direction = direction;
        }
        if let Some(count) = update.options_count {
            self.preferences.options_count = count;
        }
        if self.preferences == before {
            return Ok(());
        }

        let restart = self.preferences.language != before.language
            || self.preferences.category != before.category
            || self.preferences.direction != before.direction;
        if restart {
            self.rebuild_quiz();
        } else {
            self.quiz.set_options_count(self.preferences.options_count);
        }

        tracing::info!(
            language = %self.preferences.language,
            category = ?self.preferences.category,
            direction = ?self.preferences.direction,
            options_count = self.preferences.options_count,
            restarted = restart,
            "Preferences updated"
        );
        self.writer
            .enqueue(WriteOp::Preferences(self.preferences.clone()));
        Ok(())
    }

    pub fn words(&self, category: Option<Category>) -> Vec<WordView> {
        let language = self.preferences.language;
        let catalog = self.catalogs.get(language);
        let known = self.known.get(&language);
        catalog
            .indices_in(category)
            .into_iter()
            .filter_map(|i| catalog.get(i))
            .map(|entry| WordView {
                known: known.is_some_and(|set| set.contains(&entry.term)),
                entry: entry.clone(),
            })
            .collect()
    }

    /// Marks a word of the current language known or unknown and restarts the quiz.
    pub fn set_word_known(&mut self, term: &str, known: bool) -> Result<bool, SessionError> {
        let language = self.preferences.language;
        if self.catalogs.get(language).position_of(term).is_none() {
            return Err(SessionError::UnknownTerm {
                language,
                term: term.to_string(),
            });
        }

        let set = self.known.entry(language).or_default();
        let changed = if known {
            set.insert(term.to_string())
        } else {
            set.remove(term)
        };
        if changed {
            self.writer.enqueue(WriteOp::KnownWord {
                language,
                term: term.to_string(),
                known,
            });
            self.rebuild_quiz();
        }
        Ok(changed)
    }

    fn rebuild_quiz(&mut self) {
        let language = self.preferences.language;
        let catalog: Arc<Catalog> = Arc::clone(self.catalogs.get(language));
        let settings = quiz_settings(&self.preferences, self.requeue_skipped);
        let empty = HashSet::new();
        let known = self.known.get(&language).unwrap_or(&empty);
        self.quiz.reconfigure(catalog, settings, known);
    }

    // ---- reminders ----

    pub fn reminder_settings(&self) -> &ReminderSettings {
        &self.reminders
    }

    /// Applies the update and resyncs alarms when enabled/time/days changed.
    pub fn update_reminders(&mut self, update: ReminderUpdate) -> Result<(), SessionError> {
        let mut next = self.reminders.clone();
        if let Some(enabled) = update.enabled {
            next.enabled = enabled;
        }
        if let Some(raw) = update.time.as_deref() {
            next.time = raw.parse::<ReminderTime>()?;
        }
        if let Some(days) = update.days.as_deref() {
            next.set_days(days)?;
        }
        if next == self.reminders {
            return Ok(());
        }

        self.reminders = next;
        self.writer
            .enqueue(WriteOp::ReminderSettings(self.reminders.clone()));
        let ids = sync_schedule(self.scheduler.as_ref(), &self.reminders, &self.alarm_ids);
        self.set_alarm_ids(ids);
        Ok(())
    }

    pub fn reminder_decision(&self, now: Moment) -> DecisionView {
        let today = now.today();
        let stats = self.stats.normalized(today);
        let progress = stats.today_progress(today, self.daily_goal);
        DecisionView {
            decision: decide(&self.reminders, &progress, &stats, now, &self.policy),
            streak: stats.streak,
            today: progress,
        }
    }

    pub fn dismiss_reminder(&mut self, now: Moment) {
        self.reminders.dismiss_for_today(now.today());
        self.writer
            .enqueue(WriteOp::ReminderSettings(self.reminders.clone()));
    }

    pub fn snooze_reminder(&mut self, hours: Option<i64>, now: Moment) -> Result<DateTime<Utc>, SessionError> {
        let hours = hours.unwrap_or(self.policy.snooze_hours);
        let until = self.reminders.snooze(now.utc, hours)?;
        self.writer
            .enqueue(WriteOp::ReminderSettings(self.reminders.clone()));
        Ok(until)
    }
}

fn quiz_settings(prefs: &Preferences, requeue_skipped: bool) -> QuizSettings {
    QuizSettings {
        direction: prefs.direction,
        options_count: prefs.options_count,
        category: prefs.category,
        requeue_skipped,
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Category>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Category>::deserialize(deserializer).map(Some)
}
