//! # Pattern Race: Monte Carlo up/down pattern statistics
//!
//! Flips a fair up/down coin 100 times per trial and asks two questions about
//! the 8 length-3 patterns (`DDD` .. `UUU`):
//!
//! 1. How many symbols, on average, until each pattern first completes?
//! 2. For every ordered pair of distinct patterns, how often does the first
//!    one complete strictly before the second?
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Catalog | [`catalog`] | 8 patterns, 56 ordered pairs, compile-time tables |
//! | Generate | [`simulation::generator`] | 100 symbols from die draws (4–6 → `U`) |
//! | Locate | [`simulation::locator`] | End position of first occurrence, or 100 |
//! | Evaluate | [`simulation::evaluator`] | Expectation pass + race pass per trial |
//! | Drive | [`simulation::engine`] | N trials on rayon, one source per block |
//! | Aggregate | [`simulation::aggregate`] | Per-key atomic counters or fold/reduce shards |
//! | Report | [`report`] | Divide by N, render text and JSON |
//!
//! ## Conventions
//!
//! - Patterns and pairs are addressed by dense index (0..8, 0..56) so every
//!   table is a fixed-size array and aggregates can never miss a key.
//! - "Not found" is the value 100 (the window length), not an error. It
//!   biases averages toward the window size and makes a race between two
//!   absent patterns count as a loss for the first.
//! - Sums are `u64`: 100 × 10^6 trials fits with room to grow.

pub mod catalog;
pub mod constants;
pub mod env_config;
pub mod error;
pub mod report;
pub mod simulation;
pub mod timing;
pub mod types;
