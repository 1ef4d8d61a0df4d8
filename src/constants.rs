//! Simulation constants.
//!
//! - |Σ| = 2 symbols (`U`, `D`)
//! - L = [`PATTERN_LEN`] = 3
//! - |patterns| = [`NUM_PATTERNS`] = 2^3 = 8
//! - |pairs| = [`NUM_PAIRS`] = 8 × 8 − 8 = 56
//! - Observation window = [`SEQUENCE_LEN`] = 100 symbols

/// Length of every pattern in the catalog.
pub const PATTERN_LEN: usize = 3;

/// Number of distinct patterns over the binary alphabet: 2^L.
pub const NUM_PATTERNS: usize = 1 << PATTERN_LEN;

/// Ordered pairs of distinct patterns (self-pairs excluded).
pub const NUM_PAIRS: usize = NUM_PATTERNS * NUM_PATTERNS - NUM_PATTERNS;

/// Symbols generated per trial.
pub const SEQUENCE_LEN: usize = 100;

/// Locator result for a pattern that never completes inside the window.
///
/// Equal to [`SEQUENCE_LEN`], so "not found" counts as the full window when
/// averaged. A pattern whose first occurrence ends on the last symbol yields
/// the same value.
pub const NOT_FOUND: u16 = SEQUENCE_LEN as u16;

/// Smallest value the random source produces.
pub const DRAW_MIN: u32 = 1;

/// Largest value the random source produces (a six-sided die).
pub const DRAW_MAX: u32 = 6;

/// Draws strictly above this value become `U`, the rest `D`.
pub const UP_THRESHOLD: u32 = 3;

/// Default number of Monte Carlo trials.
pub const DEFAULT_TRIALS: u64 = 1_000_000;

/// Trials per parallel block. Each block owns one random source.
pub const TRIALS_PER_BLOCK: u64 = 4096;
