//! Reduction of trial results into per-pattern position sums and per-pair win counts.
//!
//! Two strategies, both associative and commutative over trials:
//!
//! - [`AtomicAggregates`]: one `AtomicU64` per pattern and per pair, indexed by
//!   dense catalog index. Workers `fetch_add` into the slot they touch, so
//!   contention is per key, never global.
//! - [`TrialAccumulator`]: plain per-task counters, folded inside a rayon
//!   `fold` and combined with `merge` in the `reduce` step.
//!
//! Both finish into an [`Aggregates`]. Nothing here divides by the trial count.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::catalog::{PATTERNS, PATTERN_PAIRS};
use crate::constants::*;
use crate::types::{Pattern, PatternPair};

use super::evaluator::TrialResult;

/// Final, read-only totals over `num_trials` trials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregates {
    pub num_trials: u64,
    position_sums: [u64; NUM_PATTERNS],
    win_counts: [u64; NUM_PAIRS],
}

impl Aggregates {
    pub fn new() -> Self {
        Self {
            num_trials: 0,
            position_sums: [0; NUM_PATTERNS],
            win_counts: [0; NUM_PAIRS],
        }
    }

    pub fn position_sum(&self, pattern: &Pattern) -> u64 {
        self.position_sums[pattern.index()]
    }

    /// Win count of the pair at dense index `pair`.
    pub fn win_count(&self, pair: usize) -> u64 {
        self.win_counts[pair]
    }

    /// `(pattern, sum)` in catalog order. Always [`NUM_PATTERNS`] entries.
    pub fn position_sums(&self) -> impl Iterator<Item = (&'static Pattern, u64)> + '_ {
        PATTERNS.iter().zip(self.position_sums.iter().copied())
    }

    /// `(pair, wins)` in pair-table order. Always [`NUM_PAIRS`] entries.
    pub fn win_counts(&self) -> impl Iterator<Item = (&'static PatternPair, u64)> + '_ {
        PATTERN_PAIRS.iter().zip(self.win_counts.iter().copied())
    }
}

impl Default for Aggregates {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared accumulator with per-key atomic increments.
pub struct AtomicAggregates {
    num_trials: AtomicU64,
    position_sums: [AtomicU64; NUM_PATTERNS],
    win_counts: [AtomicU64; NUM_PAIRS],
}

impl AtomicAggregates {
    pub fn new() -> Self {
        Self {
            num_trials: AtomicU64::new(0),
            position_sums: std::array::from_fn(|_| AtomicU64::new(0)),
            win_counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Add one trial. Safe to call from any number of threads at once.
    #[inline(always)]
    pub fn record(&self, result: &TrialResult) {
        for (slot, &pos) in self.position_sums.iter().zip(result.positions.iter()) {
            slot.fetch_add(pos as u64, Ordering::Relaxed);
        }
        let mut wins = result.wins;
        while wins != 0 {
            let k = wins.trailing_zeros() as usize;
            self.win_counts[k].fetch_add(1, Ordering::Relaxed);
            wins &= wins - 1;
        }
        self.num_trials.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters. Call after every recording thread has joined.
    pub fn finish(&self) -> Aggregates {
        Aggregates {
            num_trials: self.num_trials.load(Ordering::Acquire),
            position_sums: std::array::from_fn(|i| self.position_sums[i].load(Ordering::Acquire)),
            win_counts: std::array::from_fn(|k| self.win_counts[k].load(Ordering::Acquire)),
        }
    }
}

impl Default for AtomicAggregates {
    fn default() -> Self {
        Self::new()
    }
}

/// Task-local accumulator for fold/reduce aggregation.
#[derive(Clone)]
pub struct TrialAccumulator {
    num_trials: u64,
    position_sums: [u64; NUM_PATTERNS],
    win_counts: [u64; NUM_PAIRS],
}

impl TrialAccumulator {
    pub fn new() -> Self {
        Self {
            num_trials: 0,
            position_sums: [0; NUM_PATTERNS],
            win_counts: [0; NUM_PAIRS],
        }
    }

    #[inline(always)]
    pub fn record(&mut self, result: &TrialResult) {
        for (sum, &pos) in self.position_sums.iter_mut().zip(result.positions.iter()) {
            *sum += pos as u64;
        }
        let mut wins = result.wins;
        while wins != 0 {
            self.win_counts[wins.trailing_zeros() as usize] += 1;
            wins &= wins - 1;
        }
        self.num_trials += 1;
    }

    pub fn merge(&mut self, other: TrialAccumulator) {
        for (a, b) in self.position_sums.iter_mut().zip(other.position_sums) {
            *a += b;
        }
        for (a, b) in self.win_counts.iter_mut().zip(other.win_counts) {
            *a += b;
        }
        self.num_trials += other.num_trials;
    }

    pub fn finish(self) -> Aggregates {
        Aggregates {
            num_trials: self.num_trials,
            position_sums: self.position_sums,
            win_counts: self.win_counts,
        }
    }
}

impl Default for TrialAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parallel reduction of collected results through [`AtomicAggregates`].
pub fn aggregate(results: &[TrialResult]) -> Aggregates {
    let acc = AtomicAggregates::new();
    results.par_iter().for_each(|r| acc.record(r));
    acc.finish()
}

/// Single-threaded reduction, for the serial baseline.
pub fn aggregate_serial(results: &[TrialResult]) -> Aggregates {
    let mut acc = TrialAccumulator::new();
    for r in results {
        acc.record(r);
    }
    acc.finish()
}
