//! Inclusion test for convex polygons: binary search for the fan wedge around
//! the anchor vertex, then one edge-side check. `O(log n)` per query.

use super::{PipAlgorithm, Precondition, INCLUSION};
use crate::geom2::{cross, Polygon};
use nalgebra::Vector2;

pub struct Inclusion;

/// Anchor vertex plus the fan spokes `vi - v0`, precomputed per polygon.
pub struct Anchor {
    origin: Vector2<f64>,
    spokes: Vec<Vector2<f64>>,
}

impl PipAlgorithm for Inclusion {
    type State = Anchor;

    fn name(&self) -> &'static str {
        INCLUSION
    }

    fn precondition(&self) -> Precondition {
        Precondition::ConvexOnly
    }

    fn setup(&self, poly: &Polygon) -> Anchor {
        let v = poly.vertices();
        let origin = v.first().copied().unwrap_or_else(Vector2::zeros);
        let spokes = v.iter().skip(1).map(|w| w - origin).collect();
        Anchor { origin, spokes }
    }

    fn test(&self, anchor: &Anchor, _poly: &Polygon, p: Vector2<f64>) -> bool {
        let s = &anchor.spokes;
        if s.len() < 2 {
            return false;
        }
        let d = p - anchor.origin;
        let last = s.len() - 1;
        // outside the wedge between the first and the last spoke
        if cross(s[0], d) < 0.0 || cross(s[last], d) > 0.0 {
            return false;
        }
        let (mut lo, mut hi) = (0, last);
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if cross(s[mid], d) >= 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        // side of the outer edge (v[lo+1] → v[lo+2]) in spoke coordinates
        cross(s[hi] - s[lo], d - s[lo]) >= 0.0
    }
}
