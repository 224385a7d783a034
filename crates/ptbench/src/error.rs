//! Error types for configuration and the adapter lifecycle.

use crate::algo::Phase;

/// Fatal configuration problems, detected before any geometry is generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("no point in polygon tests were specified")]
    NoAlgorithm,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("polygons need at least 3 vertices (got min {0})")]
    TooFewVertices(usize),

    #[error("min vertices {min} exceeds max vertices {max}")]
    VertexRange { min: usize, max: usize },

    #[error("max vertices {max} exceeds capacity {cap}")]
    Capacity { max: usize, cap: usize },

    #[error("invalid {name}: {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
}

/// An adapter driven outside its `setup → test* → cleanup` order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{algorithm}: cannot {op} while {phase:?}")]
pub struct LifecycleError {
    pub algorithm: String,
    pub op: &'static str,
    pub phase: Phase,
}

/// Anything that aborts a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
