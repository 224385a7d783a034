//! Exterior-edges test for convex polygons: precompute one half-plane per edge
//! and reject as soon as the point is outside any of them.

use super::{PipAlgorithm, Precondition, EXTERIOR};
use crate::geom2::{Hs2, Polygon};
use nalgebra::Vector2;

pub struct Exterior;

impl PipAlgorithm for Exterior {
    type State = Vec<Hs2>;

    fn name(&self) -> &'static str {
        EXTERIOR
    }

    fn precondition(&self) -> Precondition {
        Precondition::ConvexOnly
    }

    fn setup(&self, poly: &Polygon) -> Vec<Hs2> {
        poly.edges().map(|(a, b)| Hs2::left_of(a, b)).collect()
    }

    fn test(&self, planes: &Vec<Hs2>, _poly: &Polygon, p: Vector2<f64>) -> bool {
        !planes.is_empty() && planes.iter().all(|h| h.satisfies(p))
    }
}
