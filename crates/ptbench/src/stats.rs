//! Per-plugin counters and timing accumulation.

use crate::algo::CostModel;
use std::time::Duration;

/// Accumulated outcome and timing data for one plugin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Wall-clock time summed over all timed trial batches.
    pub time_total: Duration,
    /// Trial batch size for the current polygon.
    pub trials_per_test: u64,
    /// Individual test invocations so far (batch size × points, summed over polygons).
    pub tests_run: u64,
    /// Verdict of the last trial of the last probe point.
    pub last_verdict: bool,
    /// Probe points where this plugin disagreed with the reference.
    pub mismatches: u64,
}

impl Statistics {
    /// Trial batch size for a polygon with `n` vertices.
    ///
    /// `ratio / weight` spread over `n` (or `⌊√n⌋` for resolution-driven
    /// plugins), never below one trial.
    pub fn trials_for(ratio: u64, weight: u64, cost: CostModel, n: usize) -> u64 {
        let budget = ratio / weight.max(1);
        let divisor = match cost {
            CostModel::PerVertex => n as u64,
            CostModel::PerResolution => (n as f64).sqrt() as u64,
        };
        (budget / divisor.max(1)).max(1)
    }

    /// Mean time of one test invocation, in nanoseconds.
    pub fn ns_per_test(&self) -> Option<f64> {
        if self.tests_run == 0 {
            return None;
        }
        Some(self.time_total.as_nanos() as f64 / self.tests_run as f64)
    }
}
