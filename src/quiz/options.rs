//! 干扰项生成：固定数量、无重复、恰好包含一个正确答案。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::WordEntry;
use crate::quiz::Direction;

/// Builds a shuffled multiple-choice set for `correct`.
///
/// Distractors come from every catalog entry whose answer text differs from the correct one.
/// When the catalog cannot supply `size - 1` distractors the result is shorter; it is never
/// padded with duplicates.
pub fn generate_options<R: Rng + ?Sized>(
    correct: &WordEntry,
    catalog: &[WordEntry],
    size: usize,
    direction: Direction,
    rng: &mut R,
) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }

    let correct_answer = direction.answer_of(correct);
    let mut distractors: Vec<&str> = catalog
        .iter()
        .map(|entry| direction.answer_of(entry))
        .filter(|answer| *answer != correct_answer)
        .collect();

    distractors.shuffle(rng);
    distractors.truncate(size - 1);

    let mut options: Vec<String> = distractors.into_iter().map(str::to_string).collect();
    options.push(correct_answer.to_string());
    options.shuffle(rng);

    if options.len() < size {
        tracing::warn!(
            requested = size,
            available = options.len(),
            "Catalog too small for requested option count"
        );
    }

    options
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::test_catalog;

    #[test]
    fn returns_unique_options_with_single_correct() {
        let catalog = test_catalog(40);
        let mut rng = StdRng::seed_from_u64(7);
        for entry in catalog.entries() {
            let options = generate_options(entry, catalog.entries(), 6, Direction::Forward, &mut rng);
            assert_eq!(options.len(), 6);
            let unique: HashSet<&String> = options.iter().collect();
            assert_eq!(unique.len(), 6);
            assert_eq!(
                options.iter().filter(|o| **o == entry.translation).count(),
                1
            );
        }
    }

    #[test]
    fn reverse_direction_uses_terms() {
        let catalog = test_catalog(10);
        let mut rng = StdRng::seed_from_u64(1);
        let correct = &catalog.entries()[3];
        let options = generate_options(correct, catalog.entries(), 4, Direction::Reverse, &mut rng);
        assert!(options.contains(&correct.term));
        assert!(options.iter().all(|o| o.starts_with("term-")));
    }

    #[test]
    fn small_catalog_degrades_to_fewer_options() {
        let catalog = test_catalog(3);
        let mut rng = StdRng::seed_from_u64(3);
        let correct = &catalog.entries()[0];
        let options = generate_options(correct, catalog.entries(), 6, Direction::Forward, &mut rng);
        assert_eq!(options.len(), 3);
        assert!(options.contains(&correct.translation));
    }

    #[test]
    fn correct_position_is_roughly_uniform() {
        let catalog = test_catalog(30);
        let mut rng = StdRng::seed_from_u64(42);
        let correct = &catalog.entries()[5];
        let trials = 6000;
        let mut hits = [0usize; 6];
        for _ in 0..trials {
            let options = generate_options(correct, catalog.entries(), 6, Direction::Forward, &mut rng);
            let idx = options
                .iter()
                .position(|o| *o == correct.translation)
                .expect("correct answer present");
            hits[idx] += 1;
        }
        for count in hits {
            assert!((800..=1200).contains(&count), "skewed distribution: {hits:?}");
        }
    }

    #[test]
    fn zero_size_yields_nothing() {
        let catalog = test_catalog(8);
        let mut rng = StdRng::seed_from_u64(0);
        let options =
            generate_options(&catalog.entries()[0], catalog.entries(), 0, Direction::Forward, &mut rng);
        assert!(options.is_empty());
    }
}
