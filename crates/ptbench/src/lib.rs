//! Benchmark and cross-validation harness for point-in-polygon tests.
//!
//! Overview
//! - `geom2`: random test polygons and probe points, grid snapping.
//! - `algo`: the plugin contract (`PipAlgorithm`), the lifecycle adapter and
//!   the ordered `Registry` with the shipped plugins.
//! - `oracle`: compares each plugin to the reference (crossings) test.
//! - `stats`, `report`: per-plugin counters, timing and the final summary.
//! - `driver`: the polygon × point loop tying it together.
//!
//! Everything is single-threaded and synchronous; plugins run strictly in
//! registration order for every probe point.

pub mod algo;
pub mod config;
pub mod driver;
pub mod error;
pub mod geom2;
pub mod oracle;
pub mod report;
pub mod stats;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algo::{
        Adapter, AlgorithmRegistration, CostModel, Phase, PipAlgorithm, Precondition, Registry,
    };
    pub use crate::config::{BenchConfig, GenerationConfig, TimingCfg, Tuning};
    pub use crate::driver::Benchmark;
    pub use crate::error::{BenchError, ConfigError, LifecycleError};
    pub use crate::geom2::{generate_point, generate_polygon, snap, Polygon, SampleBox};
    pub use crate::oracle::{Mismatch, Oracle};
    pub use crate::report::RunReport;
    pub use nalgebra::Vector2 as Vec2;
}
