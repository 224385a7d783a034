//! Ordered registry of plugins with their enablement and statistics.
//!
//! Registration order is the invocation order within each probe point; the
//! oracle and the report both rely on it being stable.

use super::{
    Adapter, Angle, Barycentric, CrossMult, Crossings, Exterior, Grid, Inclusion, Phase,
    PipAlgorithm, Precondition, Slot, Trapezoid, Weiler,
};
use crate::config::Tuning;
use crate::error::{ConfigError, LifecycleError};
use crate::geom2::Polygon;
use crate::stats::Statistics;
use nalgebra::Vector2;
use std::time::Instant;

/// One plugin's record for the whole process lifetime.
pub struct AlgorithmRegistration {
    adapter: Box<dyn Adapter>,
    /// Fixed for the whole run once `Registry::enable` has resolved it.
    pub work: bool,
    pub stats: Statistics,
}

impl AlgorithmRegistration {
    pub fn name(&self) -> &'static str {
        self.adapter.name()
    }

    pub fn precondition(&self) -> Precondition {
        self.adapter.precondition()
    }

    pub fn phase(&self) -> Phase {
        self.adapter.phase()
    }

    /// Run this polygon's trial batch for one point, timing it when asked.
    fn run_test(
        &mut self,
        poly: &Polygon,
        p: Vector2<f64>,
        timed: bool,
    ) -> Result<bool, LifecycleError> {
        let trials = self.stats.trials_per_test.max(1);
        let verdict = if timed {
            let start = Instant::now();
            let v = self.adapter.test_trials(poly, p, trials)?;
            self.stats.time_total += start.elapsed();
            v
        } else {
            self.adapter.test_trials(poly, p, trials)?
        };
        self.stats.tests_run += trials;
        self.stats.last_verdict = verdict;
        Ok(verdict)
    }
}

/// Ordered plugin collection.
#[derive(Default)]
pub struct Registry {
    regs: Vec<AlgorithmRegistration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped plugin set, in classic harness order.
    pub fn standard(tuning: &Tuning) -> Self {
        let mut r = Self::new();
        r.register(Angle);
        r.register(Barycentric);
        r.register(Crossings);
        r.register(Exterior);
        r.register(Grid::new(tuning.grid_resolution));
        r.register(Inclusion);
        r.register(CrossMult);
        r.register(Trapezoid::new(tuning.trapezoid_bins));
        r.register(Weiler);
        r
    }

    /// Append a plugin (disabled) and return its stable index.
    pub fn register<A>(&mut self, algo: A) -> usize
    where
        A: PipAlgorithm + 'static,
        A::State: 'static,
    {
        self.regs.push(AlgorithmRegistration {
            adapter: Box::new(Slot::new(algo)),
            work: false,
            stats: Statistics::default(),
        });
        self.regs.len() - 1
    }

    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.regs.iter().position(|r| r.name() == name)
    }

    pub fn get(&self, idx: usize) -> Option<&AlgorithmRegistration> {
        self.regs.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmRegistration> {
        self.regs.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &AlgorithmRegistration> {
        self.regs.iter().filter(|r| r.work)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled().any(|r| r.name() == name)
    }

    pub(crate) fn stats_mut(&mut self, idx: usize) -> Option<&mut Statistics> {
        self.regs.get_mut(idx).map(|r| &mut r.stats)
    }

    /// Resolve the requested names into enablement flags.
    ///
    /// Unknown names are a configuration error. Convex-only plugins requested
    /// without `convex` stay disabled and only produce a warning.
    pub fn enable(&mut self, names: &[String], convex: bool) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::NoAlgorithm);
        }
        let mut picks = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .index_of(name)
                .ok_or_else(|| ConfigError::UnknownAlgorithm(name.clone()))?;
            picks.push(idx);
        }
        for reg in &mut self.regs {
            reg.work = false;
        }
        for idx in picks {
            let reg = &mut self.regs[idx];
            if reg.precondition() == Precondition::ConvexOnly && !convex {
                tracing::warn!(
                    algorithm = reg.name(),
                    "convex-only test requested without convex mode, ignored"
                );
                continue;
            }
            reg.work = true;
        }
        Ok(())
    }

    /// Zero every plugin's counters and timings before a new run.
    pub(crate) fn reset_stats(&mut self) {
        for reg in &mut self.regs {
            reg.stats = Statistics::default();
        }
    }

    /// Size each enabled plugin's trial batch for a polygon with `n` vertices.
    pub(crate) fn plan_trials(&mut self, n: usize, test_ratio: Option<u64>) {
        for reg in self.regs.iter_mut().filter(|r| r.work) {
            reg.stats.trials_per_test = match test_ratio {
                Some(ratio) => Statistics::trials_for(
                    ratio,
                    reg.adapter.trial_weight(),
                    reg.adapter.cost_model(),
                    n,
                ),
                None => 1,
            };
        }
    }

    /// Set up every enabled plugin; on failure, release the ones already set up.
    pub(crate) fn setup_all(&mut self, poly: &Polygon) -> Result<(), LifecycleError> {
        for i in 0..self.regs.len() {
            if !self.regs[i].work {
                continue;
            }
            if let Err(e) = self.regs[i].adapter.setup(poly) {
                self.cleanup_all()?;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Run one probe point through every enabled plugin in registration order.
    pub(crate) fn test_all(
        &mut self,
        poly: &Polygon,
        p: Vector2<f64>,
        timed: bool,
    ) -> Result<(), LifecycleError> {
        for reg in self.regs.iter_mut().filter(|r| r.work) {
            reg.run_test(poly, p, timed)?;
        }
        Ok(())
    }

    /// Release every plugin currently holding state.
    pub(crate) fn cleanup_all(&mut self) -> Result<(), LifecycleError> {
        let mut first_err = None;
        for reg in self.regs.iter_mut().filter(|r| r.phase() == Phase::Ready) {
            if let Err(e) = reg.adapter.cleanup() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// First-true-wins tally: any enabled plugin calling the point inside.
    pub fn any_inside(&self) -> bool {
        self.enabled().any(|r| r.stats.last_verdict)
    }
}
