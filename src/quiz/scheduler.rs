//! 出题调度：打乱的遍历队列 + 当前题目状态机（Idle → Answered → Idle）。

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::catalog::{Catalog, Category, Language, WordEntry};
use crate::quiz::{generate_options, Direction, QuizSettings, RetryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded {
        is_correct: bool,
        /// Queue index of the re-inserted copy, if the miss was scheduled for retry.
        retry_at: Option<usize>,
    },
    AlreadyAnswered,
}

/// Snapshot of the current question as sent to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub language: Language,
    pub direction: Direction,
    pub category: Option<Category>,
    pub prompt: String,
    pub word_category: Category,
    pub options: Vec<String>,
    pub eliminated: Vec<String>,
    pub selected: Option<String>,
    pub is_correct: Option<bool>,
    /// Only revealed once the word has been answered.
    pub correct_answer: Option<String>,
    pub position: usize,
    pub queue_length: usize,
    pub cycle: u32,
    pub score: u32,
    pub total: u32,
    pub options_count: usize,
}

pub struct QuizScheduler<R = StdRng> {
    catalog: Arc<Catalog>,
    settings: QuizSettings,
    retry: RetryPolicy,
    pool: Vec<usize>,
    queue: Vec<usize>,
    position: usize,
    cycle: u32,
    options: Vec<String>,
    eliminated: Vec<String>,
    selected: Option<String>,
    is_correct: Option<bool>,
    score: u32,
    total: u32,
    rng: R,
}

impl QuizScheduler<StdRng> {
    pub fn new(
        catalog: Arc<Catalog>,
        settings: QuizSettings,
        retry: RetryPolicy,
        known_terms: &HashSet<String>,
    ) -> Self {
        Self::with_rng(catalog, settings, retry, known_terms, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizScheduler<R> {
    pub fn with_rng(
        catalog: Arc<Catalog>,
        settings: QuizSettings,
        retry: RetryPolicy,
        known_terms: &HashSet<String>,
        rng: R,
    ) -> Self {
        let pool = build_pool(&catalog, settings.category, known_terms);
        let mut scheduler = Self {
            catalog,
            settings,
            retry,
            pool,
            queue: Vec::new(),
            position: 0,
            cycle: 0,
            options: Vec::new(),
            eliminated: Vec::new(),
            selected: None,
            is_correct: None,
            score: 0,
            total: 0,
            rng,
        };
        scheduler.start();
        scheduler
    }

    /// Fresh shuffle, first word, zeroed score.
    pub fn start(&mut self) {
        self.score = 0;
        self.total = 0;
        self.cycle = 0;
        self.reshuffle();
        self.load_current();
    }

    pub fn reset(&mut self) {
        self.start();
    }

    /// Swaps catalog, filters or known words and restarts the quiz.
    pub fn reconfigure(
        &mut self,
        catalog: Arc<Catalog>,
        settings: QuizSettings,
        known_terms: &HashSet<String>,
    ) {
        self.pool = build_pool(&catalog, settings.category, known_terms);
        self.catalog = catalog;
        self.settings = settings;
        self.start();
    }

    pub fn select_answer(&mut self, candidate: &str) -> AnswerOutcome {
        if self.is_answered() {
            return AnswerOutcome::AlreadyAnswered;
        }

        let is_correct = candidate == self.correct_answer();
        let retry_at = if is_correct {
            None
        } else {
            self.retry
                .reinsert(&mut self.queue, self.position, &mut self.rng)
        };

        self.selected = Some(candidate.to_string());
        self.is_correct = Some(is_correct);
        self.total += 1;
        if is_correct {
            self.score += 1;
        }

        tracing::debug!(
            position = self.position,
            is_correct,
            retry_at = ?retry_at,
            "Answer recorded"
        );
        AnswerOutcome::Recorded {
            is_correct,
            retry_at,
        }
    }

    /// Moves to the next word. No-op until the current word is answered.
    pub fn advance(&mut self) -> bool {
        if !self.is_answered() {
            return false;
        }
        self.step();
        true
    }

    /// Moves past an unanswered word. No-op once answered.
    pub fn skip(&mut self) -> bool {
        if self.is_answered() {
            return false;
        }
        if self.settings.requeue_skipped {
            self.retry
                .reinsert(&mut self.queue, self.position, &mut self.rng);
        }
        self.step();
        true
    }

    /// Hides half of the wrong options (rounded down). Returns `false` when nothing changed.
    pub fn reveal_hint(&mut self) -> bool {
        if self.is_answered() || !self.eliminated.is_empty() {
            return false;
        }

        let correct = self.correct_answer().to_string();
        let mut wrong: Vec<&String> = self.options.iter().filter(|o| **o != correct).collect();
        let hide = wrong.len() / 2;
        if hide == 0 {
            return false;
        }
        wrong.shuffle(&mut self.rng);
        self.eliminated = wrong.into_iter().take(hide).cloned().collect();
        true
    }

    /// New size takes effect immediately while unanswered, otherwise from the next word.
    pub fn set_options_count(&mut self, count: usize) {
        self.settings.options_count = count;
        if !self.is_answered() {
            self.eliminated.clear();
            self.options = self.generate_current_options();
        }
    }

    pub fn is_answered(&self) -> bool {
        self.is_correct.is_some()
    }

    pub fn current_entry(&self) -> &WordEntry {
        &self.catalog.entries()[self.queue[self.position]]
    }

    pub fn correct_answer(&self) -> &str {
        self.settings.direction.answer_of(self.current_entry())
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    pub fn queue(&self) -> &[usize] {
        &self.queue
    }

    pub fn pool(&self) -> &[usize] {
        &self.pool
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> (u32, u32) {
        (self.score, self.total)
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn view(&self) -> QuizView {
        let entry = self.current_entry();
        let direction = self.settings.direction;
        QuizView {
            language: self.catalog.language(),
            direction,
            category: self.settings.category,
            prompt: direction.prompt_of(entry).to_string(),
            word_category: entry.category,
            options: self.options.clone(),
            eliminated: self.eliminated.clone(),
            selected: self.selected.clone(),
            is_correct: self.is_correct,
            correct_answer: self
                .is_answered()
                .then(|| direction.answer_of(entry).to_string()),
            position: self.position,
            queue_length: self.queue.len(),
            cycle: self.cycle,
            score: self.score,
            total: self.total,
            options_count: self.settings.options_count,
        }
    }

    fn step(&mut self) {
        self.position += 1;
        if self.position >= self.queue.len() {
            self.cycle += 1;
            self.reshuffle();
            tracing::debug!(cycle = self.cycle, size = self.queue.len(), "Queue reshuffled");
        }
        self.load_current();
    }

    fn reshuffle(&mut self) {
        self.queue = self.pool.clone();
        self.queue.shuffle(&mut self.rng);
        self.position = 0;
    }

    fn load_current(&mut self) {
        self.selected = None;
        self.is_correct = None;
        self.eliminated.clear();
        self.options = self.generate_current_options();
    }

    fn generate_current_options(&mut self) -> Vec<String> {
        let entry = &self.catalog.entries()[self.queue[self.position]];
        generate_options(
            entry,
            self.catalog.entries(),
            self.settings.options_count,
            self.settings.direction,
            &mut self.rng,
        )
    }
}

/// Category filter minus known words; falls back to the whole catalog when that leaves nothing.
fn build_pool(catalog: &Catalog, category: Option<Category>, known_terms: &HashSet<String>) -> Vec<usize> {
    let pool: Vec<usize> = catalog
        .indices_in(category)
        .into_iter()
        .filter(|&i| !known_terms.contains(&catalog.entries()[i].term))
        .collect();

    if pool.is_empty() {
        tracing::info!(
            language = %catalog.language(),
            category = ?category,
            "Pool empty after filtering, using whole catalog"
        );
        return catalog.indices_in(None);
    }
    pool
}
