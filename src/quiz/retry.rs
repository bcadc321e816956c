//! 间隔重试：答错的词在本轮稍后再出现，既不立刻重复，也不拖到下一轮。

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RETRY_GAP, MIN_RETRY_GAP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    min_gap: usize,
    max_gap: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_gap: MIN_RETRY_GAP,
            max_gap: MAX_RETRY_GAP,
        }
    }
}

impl RetryPolicy {
    /// `min_gap` is at least 1 so a retry never lands on the very next slot; `max_gap` is
    /// raised to `min_gap` when configured below it.
    pub fn new(min_gap: usize, max_gap: usize) -> Self {
        let min_gap = min_gap.max(1);
        Self {
            min_gap,
            max_gap: max_gap.max(min_gap),
        }
    }

    pub fn min_gap(&self) -> usize {
        self.min_gap
    }

    pub fn max_gap(&self) -> usize {
        self.max_gap
    }

    /// Inserts a copy of `queue[position]` between `min_gap` and `max_gap` slots further on.
    ///
    /// Returns the insertion index, or `None` when too few items remain in this cycle; the word
    /// then simply comes back with the next reshuffle.
    pub fn reinsert<T: Clone, R: Rng + ?Sized>(
        &self,
        queue: &mut Vec<T>,
        position: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let item = queue.get(position)?.clone();
        let remaining = queue.len() - position - 1;
        if remaining <= self.min_gap {
            return None;
        }

        let upper = self.max_gap.min(remaining - 1);
        let gap = rng.gen_range(self.min_gap..=upper);
        let insert_at = position + 1 + gap;
        queue.insert(insert_at, item);
        Some(insert_at)
    }
}
