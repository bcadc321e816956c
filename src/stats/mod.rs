//! 学习统计：纯 reducer，负责累计计数、今日进度与连续打卡天数。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsState {
    pub total_answered: u32,
    pub total_correct: u32,
    pub total_wrong: u32,
    /// 0–100, derived from the totals.
    pub accuracy: u32,
    pub streak: u32,
    pub last_date: Option<NaiveDate>,
    pub today_count: u32,
    pub today_correct: u32,
    pub today_date: Option<NaiveDate>,
    /// Only correct answers count toward the streak.
    pub streak_correct_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsAction {
    AddResult { is_correct: bool },
    Reset,
    SetStreakMode { correct_only: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayProgress {
    pub count: u32,
    pub correct: u32,
    pub goal: u32,
    pub goal_reached: bool,
}

pub fn reduce(state: StatsState, action: StatsAction, today: NaiveDate) -> StatsState {
    match action {
        StatsAction::AddResult { is_correct } => add_result(state, is_correct, today),
        StatsAction::Reset => StatsState {
            streak_correct_only: state.streak_correct_only,
            ..StatsState::default()
        },
        StatsAction::SetStreakMode { correct_only } => StatsState {
            streak_correct_only: correct_only,
            ..state
        },
    }
}

fn add_result(mut state: StatsState, is_correct: bool, today: NaiveDate) -> StatsState {
    state.total_answered += 1;
    if is_correct {
        state.total_correct += 1;
    } else {
        state.total_wrong += 1;
    }
    state.accuracy = accuracy_of(state.total_correct, state.total_answered);

    if state.today_date != Some(today) {
        state.today_date = Some(today);
        state.today_count = 0;
        state.today_correct = 0;
    }
    state.today_count += 1;
    if is_correct {
        state.today_correct += 1;
    }

    if is_correct || !state.streak_correct_only {
        match state.last_date {
            Some(last) if last == today => {}
            Some(last) if today.pred_opt() == Some(last) => {
                state.streak += 1;
                state.last_date = Some(today);
            }
            _ => {
                state.streak = 1;
                state.last_date = Some(today);
            }
        }
    }

    state
}

/// Rounded percentage of correct answers; 0 before the first answer.
pub fn accuracy_of(correct: u32, answered: u32) -> u32 {
    if answered == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(answered) * 100.0).round() as u32
}

impl StatsState {
    /// Applies day rollover to a freshly loaded snapshot: a streak whose last day is neither today
    /// nor yesterday is already broken, and yesterday's daily counters no longer apply.
    pub fn normalized(&self, today: NaiveDate) -> StatsState {
        let mut state = self.clone();

        let streak_alive = matches!(
            state.last_date,
            Some(last) if last == today || today.pred_opt() == Some(last)
        );
        if !streak_alive {
            state.streak = 0;
        }

        if state.today_date != Some(today) {
            state.today_date = None;
            state.today_count = 0;
            state.today_correct = 0;
        }

        state.total_answered = state.total_correct + state.total_wrong;
        state.accuracy = accuracy_of(state.total_correct, state.total_answered);
        state
    }

    pub fn today_progress(&self, today: NaiveDate, goal: u32) -> TodayProgress {
        let (count, correct) = if self.today_date == Some(today) {
            (self.today_count, self.today_correct)
        } else {
            (0, 0)
        };
        TodayProgress {
            count,
            correct,
            goal,
            goal_reached: goal > 0 && count >= goal,
        }
    }
}
