//! Named wall-clock checkpoints.
//!
//! Each call to [`Checkpoints::checkpoint`] closes the segment that started at
//! the previous checkpoint. [`Checkpoints::summary`] renders one line per
//! segment plus the total.

use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Segment {
    pub name: String,
    pub elapsed_ms: f64,
}

pub struct Checkpoints {
    last: Instant,
    started: Instant,
    segments: Vec<Segment>,
}

impl Checkpoints {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            last: now,
            started: now,
            segments: Vec::new(),
        }
    }

    /// Close the current segment under `name` and return its duration.
    pub fn checkpoint(&mut self, name: &str) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        self.segments.push(Segment {
            name: name.to_string(),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        });
        log::debug!("checkpoint '{}': {:.1} ms", name, elapsed.as_secs_f64() * 1000.0);
        elapsed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total(&self) -> Duration {
        self.last.duration_since(self.started)
    }

    pub fn summary(&self) -> String {
        let width = self
            .segments
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0)
            .max("total".len());
        let mut out = String::new();
        for s in &self.segments {
            out.push_str(&format!("  {:<width$}  {:>10.1} ms\n", s.name, s.elapsed_ms));
        }
        out.push_str(&format!(
            "  {:<width$}  {:>10.1} ms\n",
            "total",
            self.total().as_secs_f64() * 1000.0
        ));
        out
    }
}
