//! Pattern catalog: the 8 patterns and the 56 ordered pairs raced against each other.
//!
//! Both tables are computed at compile time and shared read-only by every
//! worker. Pair order is outer loop over `first`, inner loop over `second`,
//! skipping `first == second`, so row `i` of the win matrix occupies pair
//! indices `7 * i .. 7 * i + 7`.

use crate::constants::*;
use crate::types::{Pattern, PatternPair};

/// All patterns in catalog order: `DDD, DDU, DUD, DUU, UDD, UDU, UUD, UUU`.
pub static PATTERNS: [Pattern; NUM_PATTERNS] = make_patterns();

/// All ordered pairs of distinct patterns.
pub static PATTERN_PAIRS: [PatternPair; NUM_PAIRS] = make_pairs();

const fn make_patterns() -> [Pattern; NUM_PATTERNS] {
    let mut out = [Pattern::from_index(0); NUM_PATTERNS];
    let mut i = 0;
    while i < NUM_PATTERNS {
        out[i] = Pattern::from_index(i);
        i += 1;
    }
    out
}

const fn make_pairs() -> [PatternPair; NUM_PAIRS] {
    let patterns = make_patterns();
    let mut out = [PatternPair {
        first: patterns[0],
        second: patterns[1],
    }; NUM_PAIRS];
    let mut cnt = 0;
    let mut i = 0;
    while i < NUM_PATTERNS {
        let mut j = 0;
        while j < NUM_PATTERNS {
            if i != j {
                out[cnt] = PatternPair {
                    first: patterns[i],
                    second: patterns[j],
                };
                cnt += 1;
            }
            j += 1;
        }
        i += 1;
    }
    out
}

/// The ordered pattern list. Same value on every call.
pub fn patterns() -> [Pattern; NUM_PATTERNS] {
    make_patterns()
}

/// Cartesian product of the catalog with itself, minus self-pairs.
pub fn pattern_pairs() -> [PatternPair; NUM_PAIRS] {
    make_pairs()
}

/// Dense index of `(first, second)` in [`PATTERN_PAIRS`], or `None` for a self-pair.
#[inline(always)]
pub fn pair_index(first: usize, second: usize) -> Option<usize> {
    if first == second || first >= NUM_PATTERNS || second >= NUM_PATTERNS {
        return None;
    }
    let col = if second > first { second - 1 } else { second };
    Some(first * (NUM_PATTERNS - 1) + col)
}

/// Index of `pair` in [`PATTERN_PAIRS`].
pub fn index_of_pair(pair: &PatternPair) -> Option<usize> {
    pair_index(pair.first.index(), pair.second.index())
}
