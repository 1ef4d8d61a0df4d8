//! Trial driver: runs N independent trials on the rayon pool.
//!
//! Trials are cut into blocks of [`TRIALS_PER_BLOCK`]. Block `b` asks the
//! factory for stream `b`, keeps that source for all of its trials, and drops
//! it at the end, so no source is ever visible to two tasks. Because the
//! block layout does not depend on the thread count, a fixed seed reproduces
//! the same aggregates on any machine.
//!
//! ## Pipelines
//!
//! - [`AggregationStrategy::Atomic`]: collect every [`TrialResult`] first, then
//!   reduce them in a second parallel pass into per-key atomic counters.
//! - [`AggregationStrategy::Sharded`]: fold results into block-local
//!   accumulators while trials run, merge with `reduce`. Nothing is materialized.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::constants::*;
use crate::error::{Result, SimError};

use super::aggregate::{aggregate, aggregate_serial, Aggregates, TrialAccumulator};
use super::evaluator::{run_trial, SequenceMode, TrialResult};
use super::fast_prng::{
    RngKind, SeededFactory, SmallRngFactory, SourceFactory, SplitMixFactory,
};

/// How per-trial results are reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AggregationStrategy {
    #[default]
    Atomic,
    Sharded,
}

impl AggregationStrategy {
    pub fn name(self) -> &'static str {
        match self {
            AggregationStrategy::Atomic => "atomic",
            AggregationStrategy::Sharded => "sharded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atomic" => Some(AggregationStrategy::Atomic),
            "sharded" => Some(AggregationStrategy::Sharded),
            _ => None,
        }
    }
}

/// Everything a run needs besides the thread pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub num_trials: u64,
    /// Base seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub rng: RngKind,
    pub aggregation: AggregationStrategy,
    pub sequence_mode: SequenceMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_trials: DEFAULT_TRIALS,
            seed: None,
            rng: RngKind::default(),
            aggregation: AggregationStrategy::default(),
            sequence_mode: SequenceMode::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_trials == 0 {
            return Err(SimError::ZeroTrials);
        }
        Ok(())
    }

    /// Resolve the base seed, hitting OS entropy if none was given.
    pub fn seeded_factory(&self) -> Result<SeededFactory> {
        match self.seed {
            Some(seed) => Ok(SeededFactory::new(seed)),
            None => SeededFactory::from_entropy(),
        }
    }
}

/// Results of a complete run.
pub struct SimulationOutcome {
    pub aggregates: Aggregates,
    /// Base seed actually used (resolved from entropy when not configured).
    pub seed: u64,
    pub elapsed: Duration,
}

#[inline(always)]
fn block_range(block: u64, num_trials: u64) -> std::ops::Range<u64> {
    let start = block * TRIALS_PER_BLOCK;
    start..(start + TRIALS_PER_BLOCK).min(num_trials)
}

#[inline(always)]
fn num_blocks(num_trials: u64) -> u64 {
    num_trials.div_ceil(TRIALS_PER_BLOCK)
}

/// Run `num_trials` trials in parallel and collect every result.
///
/// Result order is unspecified; aggregation does not depend on it.
pub fn run_trials<F: SourceFactory>(
    factory: &F,
    num_trials: u64,
    mode: SequenceMode,
) -> Result<Vec<TrialResult>> {
    let blocks: Vec<Vec<TrialResult>> = (0..num_blocks(num_trials))
        .into_par_iter()
        .map(|block| -> Result<Vec<TrialResult>> {
            let mut rng = factory.create(block)?;
            Ok(block_range(block, num_trials)
                .map(|_| run_trial(&mut rng, mode))
                .collect())
        })
        .collect::<Result<_>>()?;

    let mut results = Vec::with_capacity(num_trials as usize);
    for block in blocks {
        results.extend(block);
    }
    Ok(results)
}

/// Run `num_trials` trials in parallel, folding straight into block-local
/// accumulators.
pub fn run_trials_sharded<F: SourceFactory>(
    factory: &F,
    num_trials: u64,
    mode: SequenceMode,
) -> Result<Aggregates> {
    let acc = (0..num_blocks(num_trials))
        .into_par_iter()
        .map(|block| -> Result<TrialAccumulator> {
            let mut rng = factory.create(block)?;
            let mut acc = TrialAccumulator::new();
            for _ in block_range(block, num_trials) {
                acc.record(&run_trial(&mut rng, mode));
            }
            Ok(acc)
        })
        .try_reduce(TrialAccumulator::new, |mut a, b| {
            a.merge(b);
            Ok(a)
        })?;
    Ok(acc.finish())
}

/// Single-threaded run from one source (stream 0). Baseline for timing only.
pub fn run_trials_serial<F: SourceFactory>(
    factory: &F,
    num_trials: u64,
    mode: SequenceMode,
) -> Result<Vec<TrialResult>> {
    let mut rng = factory.create(0)?;
    Ok((0..num_trials).map(|_| run_trial(&mut rng, mode)).collect())
}

fn simulate_with<F: SourceFactory>(config: &SimulationConfig, factory: &F) -> Result<Aggregates> {
    match config.aggregation {
        AggregationStrategy::Atomic => {
            let results = run_trials(factory, config.num_trials, config.sequence_mode)?;
            log::debug!("collected {} trial results", results.len());
            Ok(aggregate(&results))
        }
        AggregationStrategy::Sharded => {
            run_trials_sharded(factory, config.num_trials, config.sequence_mode)
        }
    }
}

fn serial_with<F: SourceFactory>(config: &SimulationConfig, factory: &F) -> Result<Aggregates> {
    let results = run_trials_serial(factory, config.num_trials, config.sequence_mode)?;
    Ok(aggregate_serial(&results))
}

/// Full parallel pipeline: trials, then aggregation.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationOutcome> {
    config.validate()?;
    let seeded = config.seeded_factory()?;
    log::info!(
        "simulating {} trials (rng={}, aggregation={}, sequences={}, seed={})",
        config.num_trials,
        config.rng.name(),
        config.aggregation.name(),
        config.sequence_mode.name(),
        seeded.base_seed()
    );

    let start = Instant::now();
    let aggregates = match config.rng {
        RngKind::SmallRng => simulate_with(config, &SmallRngFactory(seeded))?,
        RngKind::SplitMix => simulate_with(config, &SplitMixFactory(seeded))?,
    };
    let elapsed = start.elapsed();

    debug_assert_eq!(aggregates.num_trials, config.num_trials);
    log::info!(
        "{} trials in {:.1} ms ({:.0} trials/sec)",
        aggregates.num_trials,
        elapsed.as_secs_f64() * 1000.0,
        aggregates.num_trials as f64 / elapsed.as_secs_f64()
    );

    Ok(SimulationOutcome {
        aggregates,
        seed: seeded.base_seed(),
        elapsed,
    })
}

/// Same pipeline on the calling thread only.
pub fn simulate_serial(config: &SimulationConfig) -> Result<SimulationOutcome> {
    config.validate()?;
    let seeded = config.seeded_factory()?;
    let start = Instant::now();
    let aggregates = match config.rng {
        RngKind::SmallRng => serial_with(config, &SmallRngFactory(seeded))?,
        RngKind::SplitMix => serial_with(config, &SplitMixFactory(seeded))?,
    };
    let elapsed = start.elapsed();
    log::info!(
        "serial baseline: {} trials in {:.1} ms",
        aggregates.num_trials,
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(SimulationOutcome {
        aggregates,
        seed: seeded.base_seed(),
        elapsed,
    })
}
