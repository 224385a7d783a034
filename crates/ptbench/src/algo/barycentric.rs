//! Triangle-fan parity test using barycentric coordinates.
//!
//! The polygon is split into the fan `(v0, vi, vi+1)`; the point is inside when
//! it lies in an odd number of fan triangles. Shared fan diagonals are
//! half-open (closed on the `v0 → vi` side, open on the `v0 → vi+1` side) so a
//! point on a diagonal is counted by exactly one of its two triangles.

use super::{PipAlgorithm, BARYCENTRIC};
use crate::geom2::{cross, Polygon};
use nalgebra::Vector2;

pub struct Barycentric;

/// Whether `d = p - v0` lies in the fan triangle spanned by `e1 = vi - v0` and
/// `e2 = vi+1 - v0`, with the half-open diagonal convention.
#[inline]
fn in_fan_triangle(e1: Vector2<f64>, e2: Vector2<f64>, d: Vector2<f64>) -> bool {
    let det = cross(e1, e2);
    if det == 0.0 {
        return false;
    }
    // numerators of the barycentric weights on e1 and e2, sign-normalized
    let s = det.signum();
    let alpha = cross(d, e2) * s;
    let beta = cross(e1, d) * s;
    alpha > 0.0 && beta >= 0.0 && alpha + beta <= det.abs()
}

impl PipAlgorithm for Barycentric {
    type State = ();

    fn name(&self) -> &'static str {
        BARYCENTRIC
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), poly: &Polygon, p: Vector2<f64>) -> bool {
        let v = poly.vertices();
        if v.len() < 3 {
            return false;
        }
        let d = p - v[0];
        let mut inside = false;
        for w in v[1..].windows(2) {
            if in_fan_triangle(w[0] - v[0], w[1] - v[0], d) {
                inside = !inside;
            }
        }
        inside
    }
}
