//! Property-based tests for the catalog, locator and per-trial evaluator.

use proptest::prelude::*;

use pattern_race::catalog::{pair_index, PATTERNS, PATTERN_PAIRS};
use pattern_race::constants::*;
use pattern_race::simulation::evaluator::{evaluate, locate_all, run_trial, SequenceMode};
use pattern_race::simulation::fast_prng::RandomSource;
use pattern_race::simulation::locator::first_occurrence;
use pattern_race::types::{Sequence, Symbol};

/// Replays a fixed list of draws, cycling when exhausted.
struct Replay {
    draws: Vec<u32>,
    next: usize,
}

impl RandomSource for Replay {
    fn draw(&mut self) -> u32 {
        let v = self.draws[self.next % self.draws.len()];
        self.next += 1;
        v
    }
}

/// Strategy: a full-length random sequence.
fn sequence_strategy() -> impl Strategy<Value = Sequence> {
    prop::collection::vec(any::<bool>(), SEQUENCE_LEN).prop_map(|bits| {
        let mut seq = [Symbol::Down; SEQUENCE_LEN];
        for (s, b) in seq.iter_mut().zip(bits) {
            *s = if b { Symbol::Up } else { Symbol::Down };
        }
        seq
    })
}

fn to_string(seq: &Sequence) -> String {
    seq.iter().map(|s| s.as_char()).collect()
}

proptest! {
    // 1. Locator results stay in [L, len]; len doubles as the sentinel
    #[test]
    fn locator_in_range(seq in sequence_strategy(), idx in 0..NUM_PATTERNS) {
        let pos = first_occurrence(&PATTERNS[idx], &seq);
        prop_assert!(pos >= PATTERN_LEN as u16 && pos <= NOT_FOUND, "pos={pos}");
    }

    // 2. Locator agrees with a plain substring search
    #[test]
    fn locator_matches_str_find(seq in sequence_strategy(), idx in 0..NUM_PATTERNS) {
        let pattern = PATTERNS[idx];
        let expected = to_string(&seq)
            .find(&pattern.to_string())
            .map_or(NOT_FOUND, |i| (i + PATTERN_LEN) as u16);
        prop_assert_eq!(first_occurrence(&pattern, &seq), expected);
    }

    // 3. Evaluation is deterministic
    #[test]
    fn evaluate_deterministic(a in sequence_strategy(), b in sequence_strategy()) {
        prop_assert_eq!(evaluate(&a, &b), evaluate(&a, &b));
    }

    // 4. Race bit k is exactly positions[first] < positions[second]
    #[test]
    fn race_matches_positions(seq in sequence_strategy()) {
        let result = evaluate(&seq, &seq);
        let positions = locate_all(&seq);
        for (k, pair) in PATTERN_PAIRS.iter().enumerate() {
            let expected = positions[pair.first.index()] < positions[pair.second.index()];
            prop_assert_eq!(result.first_won(k), expected, "pair {}", pair);
        }
    }

    // 5. At most one direction of a pair can win
    #[test]
    fn race_antisymmetric(seq in sequence_strategy(), i in 0..NUM_PATTERNS, j in 0..NUM_PATTERNS) {
        prop_assume!(i != j);
        let result = evaluate(&seq, &seq);
        let ij = pair_index(i, j).unwrap();
        let ji = pair_index(j, i).unwrap();
        prop_assert!(!(result.first_won(ij) && result.first_won(ji)));
    }

    // 6. Replaying the same draws yields the same trial
    #[test]
    fn replayed_source_deterministic(
        draws in prop::collection::vec(DRAW_MIN..=DRAW_MAX, 1..300),
        shared in any::<bool>(),
    ) {
        let mode = if shared { SequenceMode::Shared } else { SequenceMode::Independent };
        let mut r1 = Replay { draws: draws.clone(), next: 0 };
        let mut r2 = Replay { draws, next: 0 };
        prop_assert_eq!(run_trial(&mut r1, mode), run_trial(&mut r2, mode));
    }

    // 7. pair_index is a bijection onto 0..NUM_PAIRS for i != j
    #[test]
    fn pair_index_roundtrip(i in 0..NUM_PATTERNS, j in 0..NUM_PATTERNS) {
        match pair_index(i, j) {
            None => prop_assert_eq!(i, j),
            Some(k) => {
                prop_assert!(k < NUM_PAIRS);
                prop_assert_eq!(PATTERN_PAIRS[k].first.index(), i);
                prop_assert_eq!(PATTERN_PAIRS[k].second.index(), j);
            }
        }
    }
}

// 8. Shared mode reads one sequence: positions and races agree with evaluate(seq, seq)
#[test]
fn shared_mode_uses_single_sequence() {
    let draws: Vec<u32> = (0..SEQUENCE_LEN as u32).map(|i| (i * 7 + 3) % 6 + 1).collect();
    let mut seq = [Symbol::Down; SEQUENCE_LEN];
    for (s, &d) in seq.iter_mut().zip(draws.iter()) {
        *s = if d > UP_THRESHOLD { Symbol::Up } else { Symbol::Down };
    }
    let mut replay = Replay { draws, next: 0 };
    assert_eq!(run_trial(&mut replay, SequenceMode::Shared), evaluate(&seq, &seq));
    assert_eq!(replay.next, SEQUENCE_LEN);
}
