//! Property-based tests: the three analysis modes agree

use proptest::prelude::*;
use std::collections::VecDeque;
use tidemark::analysis::{is_valid, AnalysisMode};
use tidemark::prelude::*;

fn small_vec(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 0..max)
}

#[test]
fn test_is_valid_table() {
    assert!(is_valid(true, false, 3, 3));
    assert!(!is_valid(true, false, 2, 3));
    assert!(is_valid(true, true, 2, 3));
    assert!(!is_valid(true, true, 3, 3));
    assert!(is_valid(false, false, 1, 3));
    assert!(!is_valid(false, false, 0, 3));
    assert!(is_valid(false, true, 0, 3));
    assert!(!is_valid(false, true, 1, 3));
}

#[test]
fn test_parallel_keeps_encounter_order() {
    let target: Vec<u32> = (0..10_000).collect();
    let mode = AnalysisMode::Parallel;
    assert!(mode.contains_in_order(&target, &[4_998, 4_999, 5_000]));
    assert!(!mode.contains_in_order(&target, &[5_000, 4_999]));
    assert!(!mode.contains_in_order(&target, &[1, 3]));
}

#[test]
fn test_mode_is_inherited_by_every_step() {
    let chain = Builder::<Vec<u8>>::with_analysis(AnalysisMode::Parallel)
        .contains(1)
        .and()
        .not()
        .contains_in_order(vec![2, 1]);
    assert_eq!(chain.analysis(), AnalysisMode::Parallel);
    assert_eq!(chain.previous().map(Step::analysis), Some(AnalysisMode::Parallel));
    assert!(chain.test(&vec![1, 2]));
}

#[test]
fn test_mode_names() {
    let names: Vec<String> = AnalysisMode::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["STANDARD", "STREAM", "PARALLEL"]);
    assert_eq!(AnalysisMode::default(), AnalysisMode::Standard);
}

proptest! {
    #[test]
    fn prop_counts_agree(target in small_vec(64), values in small_vec(8)) {
        let counts: Vec<usize> = AnalysisMode::ALL
            .iter()
            .map(|mode| mode.count_contained(&target, &values))
            .collect();
        prop_assert!(counts.iter().all(|c| *c == counts[0]));

        let total = values.len();
        for (all, not) in [(true, false), (true, true), (false, false), (false, true)] {
            let outcomes: Vec<bool> = counts
                .iter()
                .map(|c| is_valid(all, not, *c, total))
                .collect();
            prop_assert!(outcomes.iter().all(|o| *o == outcomes[0]));
        }
    }

    #[test]
    fn prop_order_checks_agree(target in small_vec(32), pattern in small_vec(4)) {
        let expected = pattern.is_empty()
            || target.windows(pattern.len()).any(|window| window == pattern.as_slice());
        for mode in AnalysisMode::ALL {
            prop_assert_eq!(mode.contains_in_order(&target, &pattern), expected, "{}", mode);
        }
    }

    #[test]
    fn prop_array_chains_agree(
        subject in small_vec(32),
        values in prop::collection::vec(0u8..6, 1..4),
        negate in any::<bool>(),
    ) {
        let outcomes: Vec<[bool; 5]> = AnalysisMode::ALL
            .iter()
            .map(|mode| {
                let builder = || {
                    let builder = Builder::<Vec<u8>>::with_analysis(*mode);
                    if negate { builder.not() } else { builder }
                };
                [
                    builder().contains(values[0]).test(&subject),
                    builder().contains_all(values.clone()).test(&subject),
                    builder().contains_any(values.clone()).test(&subject),
                    builder().contains_in_order(values.clone()).test(&subject),
                    builder().all_match(|n: &u8| *n < 3).test(&subject),
                ]
            })
            .collect();
        prop_assert_eq!(outcomes[0], outcomes[1]);
        prop_assert_eq!(outcomes[0], outcomes[2]);
    }

    #[test]
    fn prop_negation_inverts_collection_checks(
        subject in small_vec(16),
        values in prop::collection::vec(0u8..6, 1..4),
        mode in prop::sample::select(AnalysisMode::ALL.to_vec()),
    ) {
        let plain = Builder::<VecDeque<u8>>::with_analysis(mode).contains_all(values.clone());
        let negated = Builder::<VecDeque<u8>>::with_analysis(mode).not().contains_all(values);
        let queue: VecDeque<u8> = subject.into_iter().collect();
        prop_assert_ne!(plain.test(&queue), negated.test(&queue));
    }
}
