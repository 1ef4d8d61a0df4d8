//! Monte Carlo simulation pipeline.
//!
//! - [`fast_prng`]: random sources and per-block source factories
//! - [`generator`]: one random up/down sequence per call
//! - [`locator`]: first-occurrence search
//! - [`evaluator`]: expectation and race passes for one trial
//! - [`engine`]: parallel trial driver
//! - [`aggregate`]: atomic and sharded reduction into totals

pub mod aggregate;
pub mod engine;
pub mod evaluator;
pub mod fast_prng;
pub mod generator;
pub mod locator;

// Re-export commonly used items
pub use aggregate::{aggregate, Aggregates, AtomicAggregates, TrialAccumulator};
pub use engine::{
    run_trials, run_trials_serial, run_trials_sharded, simulate, simulate_serial,
    AggregationStrategy, SimulationConfig, SimulationOutcome,
};
pub use evaluator::{evaluate, run_trial, SequenceMode, TrialResult};
pub use fast_prng::{
    RandomSource, RngKind, SeededFactory, SmallRngFactory, SourceFactory, SplitMix64,
    SplitMixFactory,
};
pub use generator::generate_sequence;
pub use locator::first_occurrence;
