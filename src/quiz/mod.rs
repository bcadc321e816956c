pub mod options;
pub mod retry;
pub mod scheduler;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, WordEntry};
use crate::constants::{ALLOWED_OPTIONS_COUNTS, DEFAULT_OPTIONS_COUNT};

pub use options::generate_options;
pub use retry::RetryPolicy;
pub use scheduler::{AnswerOutcome, QuizScheduler, QuizView};

/// Which side of an entry is shown and which side must be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Show the term, pick its translation.
    #[default]
    #[serde(alias = "en-ua")]
    Forward,
    /// Show the translation, pick the term.
    #[serde(alias = "ua-en")]
    Reverse,
}

impl Direction {
    pub fn prompt_of(self, entry: &WordEntry) -> &str {
        match self {
            Self::Forward => &entry.term,
            Self::Reverse => &entry.translation,
        }
    }

    pub fn answer_of(self, entry: &WordEntry) -> &str {
        match self {
            Self::Forward => &entry.translation,
            Self::Reverse => &entry.term,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pub direction: Direction,
    pub options_count: usize,
    pub category: Option<Category>,
    pub requeue_skipped: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            options_count: DEFAULT_OPTIONS_COUNT,
            category: None,
            requeue_skipped: false,
        }
    }
}

pub fn is_valid_options_count(count: usize) -> bool {
    ALLOWED_OPTIONS_COUNTS.contains(&count)
}
