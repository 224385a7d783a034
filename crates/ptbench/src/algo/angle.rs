//! Angle-summation test: add up the signed angles the edges subtend at `p`.

use super::{PipAlgorithm, ANGLE};
use crate::geom2::{cross, Polygon};
use nalgebra::Vector2;
use std::f64::consts::PI;

pub struct Angle;

impl PipAlgorithm for Angle {
    type State = ();

    fn name(&self) -> &'static str {
        ANGLE
    }

    // one atan2 per edge; roughly ten times the cost of the crossing tests
    fn trial_weight(&self) -> u64 {
        10
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), poly: &Polygon, p: Vector2<f64>) -> bool {
        let total: f64 = poly
            .edges()
            .map(|(a, b)| {
                let u = a - p;
                let v = b - p;
                cross(u, v).atan2(u.dot(&v))
            })
            .sum();
        total.abs() > PI
    }
}
