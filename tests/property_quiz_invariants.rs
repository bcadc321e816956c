use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocab_drill::catalog::{Catalog, Category, Language, WordEntry};
use vocab_drill::quiz::{generate_options, Direction, QuizScheduler, QuizSettings, RetryPolicy};

fn catalog(size: usize) -> Catalog {
    let entries = (0..size)
        .map(|i| WordEntry {
            term: format!("w{i}"),
            translation: format!("t{i}"),
            category: if i % 2 == 0 {
                Category::Noun
            } else {
                Category::Verb
            },
        })
        .collect();
    Catalog::new(Language::En, entries).expect("catalog")
}

#[derive(Debug, Clone, Copy)]
enum Step {
    AnswerRight,
    AnswerWrong,
    Advance,
    Skip,
    Hint,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::AnswerRight),
        Just(Step::AnswerWrong),
        Just(Step::Advance),
        Just(Step::Skip),
        Just(Step::Hint),
    ]
}

proptest! {
    #[test]
    fn pt_options_unique_and_contain_answer(
        size in 1_usize..60,
        count in prop::sample::select(vec![4_usize, 6, 8]),
        pick in any::<prop::sample::Index>(),
        reverse in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let catalog = catalog(size);
        let correct = &catalog.entries()[pick.index(size)];
        let direction = if reverse { Direction::Reverse } else { Direction::Forward };
        let mut rng = StdRng::seed_from_u64(seed);

        let options = generate_options(correct, catalog.entries(), count, direction, &mut rng);

        prop_assert_eq!(options.len(), count.min(size));
        let unique: HashSet<&String> = options.iter().collect();
        prop_assert_eq!(unique.len(), options.len());
        let answer = direction.answer_of(correct).to_string();
        prop_assert!(options.contains(&answer));
    }

    #[test]
    fn pt_retry_lands_within_gap_bounds(
        len in 1_usize..80,
        pos in any::<prop::sample::Index>(),
        min_gap in 1_usize..6,
        extra in 0_usize..8,
        seed in any::<u64>(),
    ) {
        let policy = RetryPolicy::new(min_gap, min_gap + extra);
        let position = pos.index(len);
        let mut queue: Vec<usize> = (0..len).collect();
        let mut rng = StdRng::seed_from_u64(seed);

        match policy.reinsert(&mut queue, position, &mut rng) {
            Some(at) => {
                let gap = at - position - 1;
                prop_assert!(gap >= policy.min_gap() && gap <= policy.max_gap());
                prop_assert_eq!(queue.len(), len + 1);
                prop_assert_eq!(queue[at], position);
            }
            None => {
                prop_assert!(len - position - 1 <= min_gap);
                prop_assert_eq!(queue.len(), len);
            }
        }
    }

    #[test]
    fn pt_scheduler_keeps_view_consistent(
        size in 2_usize..30,
        count in prop::sample::select(vec![4_usize, 6, 8]),
        requeue_skipped in any::<bool>(),
        steps in prop::collection::vec(step(), 0..120),
        seed in any::<u64>(),
    ) {
        let settings = QuizSettings {
            options_count: count,
            requeue_skipped,
            ..QuizSettings::default()
        };
        let mut quiz = QuizScheduler::with_rng(
            Arc::new(catalog(size)),
            settings,
            RetryPolicy::default(),
            &HashSet::new(),
            StdRng::seed_from_u64(seed),
        );

        for step in steps {
            match step {
                Step::AnswerRight => {
                    let answer = quiz.correct_answer().to_string();
                    quiz.select_answer(&answer);
                }
                Step::AnswerWrong => {
                    let correct = quiz.correct_answer().to_string();
                    let wrong = quiz.options().iter().find(|o| **o != correct).cloned();
                    if let Some(wrong) = wrong {
                        quiz.select_answer(&wrong);
                    }
                }
                Step::Advance => {
                    quiz.advance();
                }
                Step::Skip => {
                    quiz.skip();
                }
                Step::Hint => {
                    quiz.reveal_hint();
                }
            }

            let (score, total) = quiz.score();
            prop_assert!(score <= total);
            prop_assert!(quiz.position() < quiz.queue().len());
            prop_assert!(quiz.queue().iter().all(|i| quiz.pool().contains(i)));

            let correct = quiz.correct_answer().to_string();
            prop_assert!(quiz.options().contains(&correct));
            prop_assert_eq!(quiz.options().len(), count.min(size));
            let unique: HashSet<&String> = quiz.options().iter().collect();
            prop_assert_eq!(unique.len(), quiz.options().len());
            prop_assert!(!quiz.eliminated().contains(&correct));
            prop_assert!(quiz.eliminated().iter().all(|e| quiz.options().contains(e)));
        }
    }
}
