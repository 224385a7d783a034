//! Run configuration: generation parameters, plugin tuning and timing.
//!
//! Defaults follow the classic harness settings (3–6 vertices, unit radius, no
//! perturbation, 20 polygons × 20 points, 20 grid cells / trapezoid bins).

use crate::error::ConfigError;
use crate::geom2::MAX_VERTICES;
use serde::Serialize;

/// Immutable parameters for polygon and probe-point generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub min_vertices: usize,
    pub max_vertices: usize,
    /// Circumscribing radius before normalization.
    pub radius: f64,
    /// Per-axis uniform jitter amplitude for each vertex.
    pub perturbation: f64,
    /// Sampling box size relative to the polygon bbox; values below 1 only warn.
    pub box_ratio: f64,
    /// Grid increment for snapping; 0 disables snapping.
    pub grid_increment: f64,
    pub polygon_count: usize,
    pub points_per_polygon: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_vertices: 3,
            max_vertices: 6,
            radius: 1.0,
            perturbation: 0.0,
            box_ratio: 1.0,
            grid_increment: 0.0,
            polygon_count: 20,
            points_per_polygon: 20,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_vertices < 3 {
            return Err(ConfigError::TooFewVertices(self.min_vertices));
        }
        if self.min_vertices > self.max_vertices {
            return Err(ConfigError::VertexRange {
                min: self.min_vertices,
                max: self.max_vertices,
            });
        }
        if self.max_vertices > MAX_VERTICES {
            return Err(ConfigError::Capacity {
                max: self.max_vertices,
                cap: MAX_VERTICES,
            });
        }
        non_negative("radius", self.radius)?;
        non_negative("perturbation", self.perturbation)?;
        non_negative("grid increment", self.grid_increment)?;
        if !(self.box_ratio.is_finite() && self.box_ratio > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "box ratio",
                value: self.box_ratio,
                reason: "must be positive",
            });
        }
        if self.box_ratio < 1.0 {
            tracing::warn!(box_ratio = self.box_ratio, "ratio is smaller than 1.0");
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be finite and >= 0",
        })
    }
}

/// Algorithm-specific tuning values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tuning {
    /// Cells per axis for the grid test.
    pub grid_resolution: usize,
    /// Horizontal slabs for the trapezoid test.
    pub trapezoid_bins: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_resolution: 20,
            trapezoid_bins: 20,
        }
    }
}

/// Timing instrumentation. Off by default; never changes recorded verdicts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimingCfg {
    pub enabled: bool,
    /// Base trial budget per logical test, divided by the per-polygon cost.
    pub test_ratio: u64,
}

impl Default for TimingCfg {
    fn default() -> Self {
        Self {
            enabled: false,
            test_ratio: 20_000_000,
        }
    }
}

/// Everything one benchmark run needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenchConfig {
    pub generation: GenerationConfig,
    pub tuning: Tuning,
    pub timing: TimingCfg,
    /// Enables convex-only plugins.
    pub convex: bool,
    /// Seed for the run's RNG; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Requested plugin names; order does not matter, registration order does.
    pub algorithms: Vec<String>,
}

impl BenchConfig {
    /// Check everything except algorithm names (the registry resolves those).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithm);
        }
        self.generation.validate()?;
        if self.tuning.grid_resolution == 0 {
            return Err(ConfigError::ZeroCount("grid resolution"));
        }
        if self.tuning.trapezoid_bins == 0 {
            return Err(ConfigError::ZeroCount("trapezoid bins"));
        }
        if self.timing.enabled && self.timing.test_ratio == 0 {
            return Err(ConfigError::ZeroCount("test ratio"));
        }
        if self.convex && self.generation.perturbation > 0.0 && self.generation.max_vertices > 3 {
            tracing::warn!(
                perturbation = self.generation.perturbation,
                "vertex perturbation is > 0.0, which is exciting when using convex-only algorithms"
            );
        }
        Ok(())
    }
}
