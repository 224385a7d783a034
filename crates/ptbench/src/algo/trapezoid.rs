//! Trapezoid (bin) test: slice the bbox into horizontal slabs and keep, per
//! slab, the edges overlapping it. A query runs the crossings rule over the
//! edges of its slab only.

use super::crossings::crossing_parity;
use super::{CostModel, PipAlgorithm, TRAPEZOID};
use crate::geom2::Polygon;
use nalgebra::Vector2;

pub struct Trapezoid {
    bins: usize,
}

impl Trapezoid {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }
}

/// Per-polygon slabs.
pub struct TrapezoidSet {
    y_min: f64,
    y_max: f64,
    height: f64,
    bins: Vec<Vec<(Vector2<f64>, Vector2<f64>)>>,
}

impl TrapezoidSet {
    #[inline]
    fn bin(&self, y: f64) -> usize {
        let i = ((y - self.y_min) / self.height).floor();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(self.bins.len() - 1)
        }
    }
}

impl PipAlgorithm for Trapezoid {
    type State = Option<TrapezoidSet>;

    fn name(&self) -> &'static str {
        TRAPEZOID
    }

    fn cost_model(&self) -> CostModel {
        CostModel::PerResolution
    }

    fn setup(&self, poly: &Polygon) -> Option<TrapezoidSet> {
        let bb = poly.bbox()?;
        let span = bb.max.y - bb.min.y;
        let mut set = TrapezoidSet {
            y_min: bb.min.y,
            y_max: bb.max.y,
            height: if span > 0.0 { span / self.bins as f64 } else { 1.0 },
            bins: vec![Vec::new(); self.bins],
        };
        for (a, b) in poly.edges() {
            let lo = set.bin(a.y.min(b.y));
            let hi = set.bin(a.y.max(b.y));
            for slab in &mut set.bins[lo..=hi] {
                slab.push((a, b));
            }
        }
        Some(set)
    }

    fn test(&self, state: &Option<TrapezoidSet>, _poly: &Polygon, p: Vector2<f64>) -> bool {
        let Some(set) = state else {
            return false;
        };
        if p.y < set.y_min || p.y > set.y_max {
            return false;
        }
        crossing_parity(set.bins[set.bin(p.y)].iter().copied(), p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn slabs_reproduce_crossings() {
        let poly = Polygon::new(vec![
            Vector2::new(-1.0, -1.0),
            Vector2::new(1.0, -0.8),
            Vector2::new(0.1, 0.0),
            Vector2::new(0.9, 1.0),
            Vector2::new(-0.7, 0.6),
        ]);
        let mut rng = StdRng::seed_from_u64(17);
        for bins in [1, 2, 7, 40] {
            let trap = Trapezoid::new(bins);
            let set = trap.setup(&poly);
            for _ in 0..500 {
                let p = Vector2::new(rng.gen_range(-1.2..1.2), rng.gen_range(-1.2..1.2));
                assert_eq!(
                    trap.test(&set, &poly, p),
                    crossing_parity(poly.edges(), p),
                    "{bins} bins at {p:?}"
                );
            }
        }
    }

    #[test]
    fn flat_polygon_uses_a_unit_slab() {
        let poly = Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
        ]);
        let set = Trapezoid::new(4).setup(&poly).unwrap();
        assert_eq!(set.height, 1.0);
        assert!(!Trapezoid::new(4).test(&Some(set), &poly, Vector2::new(0.5, 0.0)));
    }
}
