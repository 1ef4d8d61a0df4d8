//! End-to-end tests: driver + aggregation + report.
//!
//! These run real simulations (up to 100k trials), so they are slower than the
//! unit tests.

use pattern_race::catalog::{pair_index, PATTERNS};
use pattern_race::constants::*;
use pattern_race::report::Report;
use pattern_race::simulation::{
    aggregate, run_trials, simulate, AggregationStrategy, RngKind, SeededFactory, SequenceMode,
    SimulationConfig, SmallRngFactory,
};

fn config(num_trials: u64, seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_trials,
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

fn pattern_index(s: &str) -> usize {
    s.parse::<pattern_race::types::Pattern>().unwrap().index()
}

// ── Reduction sanity ─────────────────────────────────────────────────

#[test]
fn single_trial_aggregate_equals_trial() {
    let factory = SmallRngFactory(SeededFactory::new(99));
    let results = run_trials(&factory, 1, SequenceMode::Independent).unwrap();
    assert_eq!(results.len(), 1);

    let outcome = simulate(&config(1, 99)).unwrap();
    let agg = outcome.aggregates;
    assert_eq!(agg.num_trials, 1);
    for (pattern, sum) in agg.position_sums() {
        assert_eq!(sum, results[0].position(pattern) as u64);
    }
    for (k, (_, wins)) in agg.win_counts().enumerate() {
        assert_eq!(wins, results[0].first_won(k) as u64);
    }
}

#[test]
fn keys_fixed_regardless_of_trial_count() {
    for n in [1u64, 10, 5000] {
        let agg = simulate(&config(n, 1)).unwrap().aggregates;
        assert_eq!(agg.position_sums().count(), NUM_PATTERNS);
        assert_eq!(agg.win_counts().count(), NUM_PAIRS);
        assert_eq!(agg.num_trials, n);
    }
}

#[test]
fn pair_totals_consistent_with_trial_count() {
    let n = 20_000u64;
    let factory = SmallRngFactory(SeededFactory::new(5));
    let results = run_trials(&factory, n, SequenceMode::Shared).unwrap();
    let agg = aggregate(&results);

    for i in 0..NUM_PATTERNS {
        for j in (i + 1)..NUM_PATTERNS {
            let ij = pair_index(i, j).unwrap();
            let ji = pair_index(j, i).unwrap();
            // Shared mode: race positions are the expectation positions.
            let ties = results
                .iter()
                .filter(|r| r.positions[i] == r.positions[j])
                .count() as u64;
            assert_eq!(
                agg.win_count(ij) + agg.win_count(ji) + ties,
                n,
                "{} vs {}",
                PATTERNS[i],
                PATTERNS[j]
            );
        }
    }
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn fixed_seed_reproducible_across_thread_counts() {
    let cfg = config(3 * TRIALS_PER_BLOCK + 123, 2024);
    let run_on = |threads: usize| {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        pool.install(|| simulate(&cfg).unwrap().aggregates)
    };
    assert_eq!(run_on(1), run_on(4));
}

#[test]
fn all_configurations_agree_on_trial_count() {
    for rng in [RngKind::SmallRng, RngKind::SplitMix] {
        for aggregation in [AggregationStrategy::Atomic, AggregationStrategy::Sharded] {
            for sequence_mode in [SequenceMode::Independent, SequenceMode::Shared] {
                let cfg = SimulationConfig {
                    rng,
                    aggregation,
                    sequence_mode,
                    ..config(7_777, 3)
                };
                assert_eq!(simulate(&cfg).unwrap().aggregates.num_trials, 7_777);
            }
        }
    }
}

// ── Statistical convergence ──────────────────────────────────────────

#[test]
fn averages_near_analytic_waiting_times() {
    let n = 100_000u64;
    let agg = simulate(&config(n, 12345)).unwrap().aggregates;
    let report = Report::from_aggregates(&agg, 12345, "independent");

    // Waiting times for a fair coin: HHH 14, HHT 8, HTH 10, HTT 8 (and mirrors).
    let expected = [
        ("DDD", 14.0),
        ("DDU", 8.0),
        ("DUD", 10.0),
        ("DUU", 8.0),
        ("UDD", 8.0),
        ("UDU", 10.0),
        ("UUD", 8.0),
        ("UUU", 14.0),
    ];
    for (name, want) in expected {
        let got = report.expectations[pattern_index(name)].average;
        assert!((got - want).abs() < 0.25, "{name}: got {got:.3}, want ~{want}");
    }
}

#[test]
fn penney_races_match_known_odds() {
    let n = 100_000u64;
    let agg = simulate(&SimulationConfig {
        rng: RngKind::SplitMix,
        aggregation: AggregationStrategy::Sharded,
        ..config(n, 777)
    })
    .unwrap()
    .aggregates;
    let report = Report::from_aggregates(&agg, 777, "independent");

    let percent = |a: &str, b: &str| {
        let k = pair_index(pattern_index(a), pattern_index(b)).unwrap();
        report.races[k].percent
    };

    // THH beats HHT 3:1; HHT beats HTH 2:1; HHH vs TTT is a coin flip.
    assert!((percent("DUU", "UUD") - 75.0).abs() < 1.0);
    assert!((percent("UUD", "UDU") - 66.67).abs() < 1.0);
    assert!((percent("UUU", "DDD") - 50.0).abs() < 1.0);
}
