//! Normalized results and their text / JSON renderings.
//!
//! This is where raw aggregates get divided by the trial count: average
//! first-occurrence position per pattern, and the percentage of trials in
//! which each pair's first pattern won.

use std::fmt::Write as _;

use serde::Serialize;

use crate::catalog::{pair_index, PATTERNS};
use crate::constants::*;
use crate::error::Result;
use crate::simulation::aggregate::Aggregates;
use crate::timing::Segment;
use crate::types::Pattern;

#[derive(Debug, Serialize)]
pub struct Expectation {
    pub pattern: Pattern,
    pub position_sum: u64,
    pub average: f64,
}

#[derive(Debug, Serialize)]
pub struct Race {
    pub first: Pattern,
    pub second: Pattern,
    pub wins: u64,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub num_trials: u64,
    pub seed: u64,
    pub sequence_length: usize,
    pub sequence_mode: String,
    pub expectations: Vec<Expectation>,
    pub races: Vec<Race>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timings: Vec<Segment>,
}

impl Report {
    pub fn from_aggregates(agg: &Aggregates, seed: u64, sequence_mode: &str) -> Self {
        let n = agg.num_trials as f64;
        let expectations = agg
            .position_sums()
            .map(|(&pattern, sum)| Expectation {
                pattern,
                position_sum: sum,
                average: sum as f64 / n,
            })
            .collect();
        let races = agg
            .win_counts()
            .map(|(pair, wins)| Race {
                first: pair.first,
                second: pair.second,
                wins,
                percent: wins as f64 / n * 100.0,
            })
            .collect();
        Self {
            num_trials: agg.num_trials,
            seed,
            sequence_length: SEQUENCE_LEN,
            sequence_mode: sequence_mode.to_string(),
            expectations,
            races,
            timings: Vec::new(),
        }
    }

    /// One line per pattern, catalog order.
    pub fn format_expectations(&self) -> String {
        let mut out = String::new();
        for e in &self.expectations {
            let _ = writeln!(
                out,
                "{} average until occurrence: {:.1} occurrences",
                e.pattern, e.average
            );
        }
        out
    }

    /// 8×8 matrix of "row beats column" percentages, diagonal blank.
    pub fn format_win_matrix(&self) -> String {
        let mut out = String::from("    ");
        for p in PATTERNS.iter() {
            let _ = write!(out, "{:>5} ", p);
        }
        out.truncate(out.trim_end_matches(' ').len());
        out.push('\n');
        for (i, row) in PATTERNS.iter().enumerate() {
            let _ = write!(out, "{} ", row);
            for j in 0..NUM_PATTERNS {
                match pair_index(i, j) {
                    Some(k) => {
                        let _ = write!(out, "{:>5.1} ", self.races[k].percent);
                    }
                    None => out.push_str("      "),
                }
            }
            let trimmed = out.trim_end_matches(' ').len();
            out.truncate(trimmed);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the report as pretty JSON.
pub fn save_report(report: &Report, path: &str) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json)?;
    log::info!("report written to {}", path);
    Ok(())
}
