//! Per-trial evaluation: the expectation pass and the race pass.
//!
//! ## Tie policy
//!
//! The race pass records `position(first) < position(second)`. When neither
//! pattern appears, both sides hold [`NOT_FOUND`] and the pair is recorded as
//! `false`: "first did not win", even though nothing happened. A pattern
//! ending on the last symbol also reports [`NOT_FOUND`] and ties the same way.
//! Both cases are kept as-is, so `wins(A,B) + wins(B,A)` can fall short of the
//! trial count.

use crate::catalog::{PATTERNS, PATTERN_PAIRS};
use crate::constants::*;
use crate::types::{Pattern, PatternPair, Sequence};

use super::fast_prng::RandomSource;
use super::generator::generate_sequence;
use super::locator::first_occurrence;

/// Whether the expectation and race passes of one trial read the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Each pass draws its own sequence (two sequences per trial).
    #[default]
    Independent,
    /// One sequence per trial, read by both passes.
    Shared,
}

impl SequenceMode {
    pub fn name(self) -> &'static str {
        match self {
            SequenceMode::Independent => "independent",
            SequenceMode::Shared => "shared",
        }
    }
}

/// First-occurrence positions for every catalog pattern.
pub type Positions = [u16; NUM_PATTERNS];

/// Outcome of one trial.
///
/// `positions[k]` belongs to `PATTERNS[k]`; bit `k` of `wins` belongs to
/// `PATTERN_PAIRS[k]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialResult {
    pub positions: Positions,
    pub wins: u64,
}

impl TrialResult {
    #[inline(always)]
    pub fn position(&self, pattern: &Pattern) -> u16 {
        self.positions[pattern.index()]
    }

    /// Race outcome of the pair at dense index `pair`.
    #[inline(always)]
    pub fn first_won(&self, pair: usize) -> bool {
        (self.wins >> pair) & 1 == 1
    }

    /// `(pair, first_won)` for all pairs, in table order.
    pub fn races(&self) -> impl Iterator<Item = (&'static PatternPair, bool)> + '_ {
        PATTERN_PAIRS
            .iter()
            .enumerate()
            .map(move |(k, pair)| (pair, self.first_won(k)))
    }
}

/// Expectation pass: locate every catalog pattern in `seq`.
#[inline(always)]
pub fn locate_all(seq: &Sequence) -> Positions {
    let mut positions = [NOT_FOUND; NUM_PATTERNS];
    for (slot, pattern) in positions.iter_mut().zip(PATTERNS.iter()) {
        *slot = first_occurrence(pattern, seq);
    }
    positions
}

/// Race outcomes from already located positions, one bit per pair.
#[inline(always)]
pub fn race_from_positions(positions: &Positions) -> u64 {
    let mut wins = 0u64;
    for (k, pair) in PATTERN_PAIRS.iter().enumerate() {
        if positions[pair.first.index()] < positions[pair.second.index()] {
            wins |= 1 << k;
        }
    }
    wins
}

/// Race pass: for every pair, did `first` complete strictly before `second`?
#[inline(always)]
pub fn race_all(seq: &Sequence) -> u64 {
    race_from_positions(&locate_all(seq))
}

/// Evaluate both passes over explicit sequences.
pub fn evaluate(expectation_seq: &Sequence, race_seq: &Sequence) -> TrialResult {
    TrialResult {
        positions: locate_all(expectation_seq),
        wins: race_all(race_seq),
    }
}

/// Run one trial: generate sequence(s) from `rng` and evaluate both passes.
#[inline(always)]
pub fn run_trial<R: RandomSource + ?Sized>(rng: &mut R, mode: SequenceMode) -> TrialResult {
    match mode {
        SequenceMode::Independent => {
            let expectation_seq = generate_sequence(rng);
            let race_seq = generate_sequence(rng);
            evaluate(&expectation_seq, &race_seq)
        }
        SequenceMode::Shared => {
            let seq = generate_sequence(rng);
            let positions = locate_all(&seq);
            TrialResult {
                positions,
                wins: race_from_positions(&positions),
            }
        }
    }
}
