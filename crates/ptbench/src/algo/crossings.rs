//! Ray-crossing parity tests: the reference test and its division-free variant.

use super::{PipAlgorithm, CROSSINGS, CROSS_MULT};
use crate::geom2::Polygon;
use nalgebra::Vector2;

/// Parity of crossings between the polygon and the ray `+x` from `p`.
///
/// An edge counts when its endpoints straddle `p.y` (half-open: `v.y > p.y`)
/// and its intersection with the horizontal line lies right of `p.x`.
pub(crate) fn crossing_parity<I>(edges: I, p: Vector2<f64>) -> bool
where
    I: IntoIterator<Item = (Vector2<f64>, Vector2<f64>)>,
{
    let mut inside = false;
    for (a, b) in edges {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Classic crossings test; defined for any simple polygon without setup.
pub struct Crossings;

impl PipAlgorithm for Crossings {
    type State = ();

    fn name(&self) -> &'static str {
        CROSSINGS
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), poly: &Polygon, p: Vector2<f64>) -> bool {
        crossing_parity(poly.edges(), p)
    }
}

/// Crossings test with the intersection compared by cross-multiplication.
pub struct CrossMult;

impl PipAlgorithm for CrossMult {
    type State = ();

    fn name(&self) -> &'static str {
        CROSS_MULT
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), poly: &Polygon, p: Vector2<f64>) -> bool {
        let mut inside = false;
        for (v0, v1) in poly.edges() {
            let y0 = v0.y >= p.y;
            let y1 = v1.y >= p.y;
            if y0 != y1 {
                // sign of the intersection's x offset, scaled by the edge's dy
                let right = (v1.y - p.y) * (v0.x - v1.x) >= (v1.x - p.x) * (v0.y - v1.y);
                if right == y1 {
                    inside = !inside;
                }
            }
        }
        inside
    }
}
