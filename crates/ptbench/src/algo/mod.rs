//! Pluggable point-in-polygon algorithms and their uniform lifecycle.
//!
//! Purpose
//! - `PipAlgorithm` is what a plugin implements: `setup` once per polygon,
//!   `test` once per probe point (possibly repeated for timing), `cleanup` once
//!   per polygon. The per-polygon state is an associated type owned by the
//!   plugin.
//! - `Slot<A>` wraps a plugin together with its current state and enforces
//!   `Uninitialized → Ready → Released`; the registry only sees it as a
//!   `dyn Adapter`, so the core never touches plugin state.
//!
//! Adding a plugin means implementing `PipAlgorithm` and registering it; no
//! other core code changes.

mod angle;
mod barycentric;
mod crossings;
mod exterior;
mod grid;
mod inclusion;
mod registry;
mod trapezoid;
mod weiler;

pub use angle::Angle;
pub use barycentric::Barycentric;
pub use crossings::{CrossMult, Crossings};
pub use exterior::Exterior;
pub use grid::Grid;
pub use inclusion::Inclusion;
pub use registry::{AlgorithmRegistration, Registry};
pub use trapezoid::Trapezoid;
pub use weiler::Weiler;

use crate::error::LifecycleError;
use crate::geom2::Polygon;
use nalgebra::Vector2;
use serde::Serialize;

pub const ANGLE: &str = "angle";
pub const BARYCENTRIC: &str = "barycentric";
pub const CROSSINGS: &str = "crossings";
pub const EXTERIOR: &str = "exterior";
pub const GRID: &str = "grid";
pub const INCLUSION: &str = "inclusion";
pub const CROSS_MULT: &str = "cross-mult";
pub const TRAPEZOID: &str = "trapezoid";
pub const WEILER: &str = "weiler";

/// Geometric restriction a plugin needs for correct answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precondition {
    None,
    ConvexOnly,
}

/// How a plugin's per-test cost grows with the polygon, used to size timing batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostModel {
    /// Linear in the vertex count.
    PerVertex,
    /// Driven by a spatial resolution; roughly `√n`.
    PerResolution,
}

/// Per-polygon lifecycle state of one plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Released,
}

/// Contract every point-in-polygon plugin satisfies.
pub trait PipAlgorithm {
    /// Precomputed per-polygon data; `()` for stateless tests.
    type State;

    fn name(&self) -> &'static str;

    fn precondition(&self) -> Precondition {
        Precondition::None
    }

    fn cost_model(&self) -> CostModel {
        CostModel::PerVertex
    }

    /// Divides the timing budget for plugins much slower per vertex than the rest.
    fn trial_weight(&self) -> u64 {
        1
    }

    fn setup(&self, poly: &Polygon) -> Self::State;

    /// Inside/outside verdict. Points on the boundary resolve however the
    /// plugin likes; no cross-plugin agreement is expected there.
    fn test(&self, state: &Self::State, poly: &Polygon, p: Vector2<f64>) -> bool;

    fn cleanup(&self, state: Self::State) {
        drop(state);
    }
}

/// Object-safe view of a plugin plus its state, as held by the registry.
pub trait Adapter {
    fn name(&self) -> &'static str;
    fn precondition(&self) -> Precondition;
    fn cost_model(&self) -> CostModel;
    fn trial_weight(&self) -> u64;
    fn phase(&self) -> Phase;
    fn setup(&mut self, poly: &Polygon) -> Result<(), LifecycleError>;
    /// Run `trials` identical tests and return the last verdict.
    fn test_trials(
        &self,
        poly: &Polygon,
        p: Vector2<f64>,
        trials: u64,
    ) -> Result<bool, LifecycleError>;
    fn cleanup(&mut self) -> Result<(), LifecycleError>;
}

/// A plugin and the state its last `setup` produced.
pub struct Slot<A: PipAlgorithm> {
    algo: A,
    state: Option<A::State>,
    phase: Phase,
}

impl<A: PipAlgorithm> Slot<A> {
    pub fn new(algo: A) -> Self {
        Self {
            algo,
            state: None,
            phase: Phase::Uninitialized,
        }
    }

    fn misuse(&self, op: &'static str) -> LifecycleError {
        LifecycleError {
            algorithm: self.algo.name().to_string(),
            op,
            phase: self.phase,
        }
    }
}

impl<A: PipAlgorithm> Adapter for Slot<A> {
    fn name(&self) -> &'static str {
        self.algo.name()
    }

    fn precondition(&self) -> Precondition {
        self.algo.precondition()
    }

    fn cost_model(&self) -> CostModel {
        self.algo.cost_model()
    }

    fn trial_weight(&self) -> u64 {
        self.algo.trial_weight().max(1)
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn setup(&mut self, poly: &Polygon) -> Result<(), LifecycleError> {
        if self.phase == Phase::Ready {
            return Err(self.misuse("setup"));
        }
        self.state = Some(self.algo.setup(poly));
        self.phase = Phase::Ready;
        Ok(())
    }

    fn test_trials(
        &self,
        poly: &Polygon,
        p: Vector2<f64>,
        trials: u64,
    ) -> Result<bool, LifecycleError> {
        let state = match (&self.state, self.phase) {
            (Some(s), Phase::Ready) => s,
            _ => return Err(self.misuse("test")),
        };
        let mut verdict = self.algo.test(state, poly, p);
        for _ in 1..trials {
            verdict = self
                .algo
                .test(std::hint::black_box(state), poly, std::hint::black_box(p));
        }
        Ok(verdict)
    }

    fn cleanup(&mut self) -> Result<(), LifecycleError> {
        match (self.state.take(), self.phase) {
            (Some(s), Phase::Ready) => {
                self.algo.cleanup(s);
                self.phase = Phase::Released;
                Ok(())
            }
            (state, _) => {
                self.state = state;
                Err(self.misuse("cleanup"))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
