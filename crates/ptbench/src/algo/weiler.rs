//! Weiler's quadrant test: track the quadrant of each vertex around `p` and
//! accumulate the winding in quarter turns.

use super::{PipAlgorithm, WEILER};
use crate::geom2::Polygon;
use nalgebra::Vector2;

pub struct Weiler;

#[inline]
fn quadrant(v: Vector2<f64>, p: Vector2<f64>) -> i32 {
    match (v.x > p.x, v.y > p.y) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

impl PipAlgorithm for Weiler {
    type State = ();

    fn name(&self) -> &'static str {
        WEILER
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), poly: &Polygon, p: Vector2<f64>) -> bool {
        let Some(&last) = poly.vertices().last() else {
            return false;
        };
        let mut prev = last;
        let mut q_prev = quadrant(prev, p);
        let mut winding = 0;
        for &v in poly.vertices() {
            let q = quadrant(v, p);
            let delta = match q - q_prev {
                3 => -1,
                -3 => 1,
                d @ (2 | -2) => {
                    // diagonal jump: which side of `p` did the edge pass?
                    let x = prev.x - (prev.y - p.y) * (v.x - prev.x) / (v.y - prev.y);
                    if x > p.x {
                        -d
                    } else {
                        d
                    }
                }
                d => d,
            };
            winding += delta;
            prev = v;
            q_prev = q;
        }
        winding != 0
    }
}
