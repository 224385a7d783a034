//! Grid test: a `resolution × resolution` lattice over the polygon's bbox.
//!
//! Setup stores, per cell, a reference point with its inside status and the
//! edges that might cross the cell. A query walks from the reference point to
//! the probe and flips the stored status once per edge crossed, so only the
//! edges of one cell are touched.
//!
//! The reference point is whichever of nine candidates in the cell lies
//! farthest from the cell's edges (the center for cells without edges). A
//! reference sitting on an edge would make the stored parity and the
//! per-query flips disagree.

use super::crossings::crossing_parity;
use super::{CostModel, PipAlgorithm, GRID};
use crate::geom2::{orient, Aabb2, Polygon};
use nalgebra::Vector2;

pub struct Grid {
    resolution: usize,
}

impl Grid {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution: resolution.max(1),
        }
    }
}

/// Candidate reference positions per axis, as fractions of the cell size.
const REFERENCE_FRACTIONS: [f64; 3] = [0.5, 0.25, 0.75];

#[derive(Clone, Debug)]
struct Cell {
    reference: Vector2<f64>,
    reference_inside: bool,
    /// Edges `(a, b)` whose bbox overlaps the cell.
    edges: Vec<(Vector2<f64>, Vector2<f64>)>,
}

/// Per-polygon lattice.
pub struct GridSet {
    bbox: Aabb2,
    cell: Vector2<f64>,
    res: usize,
    cells: Vec<Cell>,
}

impl GridSet {
    #[inline]
    fn axis_index(&self, v: f64, lo: f64, size: f64) -> usize {
        let i = ((v - lo) / size).floor();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(self.res - 1)
        }
    }

    #[inline]
    fn index(&self, p: Vector2<f64>) -> (usize, usize) {
        (
            self.axis_index(p.x, self.bbox.min.x, self.cell.x),
            self.axis_index(p.y, self.bbox.min.y, self.cell.y),
        )
    }

    fn at(&self, ix: usize, iy: usize, fx: f64, fy: f64) -> Vector2<f64> {
        Vector2::new(
            self.bbox.min.x + (ix as f64 + fx) * self.cell.x,
            self.bbox.min.y + (iy as f64 + fy) * self.cell.y,
        )
    }

    /// Candidate point of cell `(ix, iy)` farthest from `edges`, center first on ties.
    fn reference(
        &self,
        ix: usize,
        iy: usize,
        edges: &[(Vector2<f64>, Vector2<f64>)],
    ) -> Vector2<f64> {
        let mut best = (f64::NEG_INFINITY, self.at(ix, iy, 0.5, 0.5));
        for fy in REFERENCE_FRACTIONS {
            for fx in REFERENCE_FRACTIONS {
                let c = self.at(ix, iy, fx, fy);
                let clearance = edges
                    .iter()
                    .map(|(a, b)| segment_distance_sq(c, *a, *b))
                    .fold(f64::INFINITY, f64::min);
                if clearance > best.0 {
                    best = (clearance, c);
                }
            }
        }
        best.1
    }
}

#[inline]
fn segment_distance_sq(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t - p).norm_squared()
}

/// Proper crossing of segments `p→q` and `a→b`, with the same half-open
/// tie-break on both sides.
#[inline]
fn segments_cross(p: Vector2<f64>, q: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> bool {
    (orient(a, b, p) > 0.0) != (orient(a, b, q) > 0.0)
        && (orient(p, q, a) > 0.0) != (orient(p, q, b) > 0.0)
}

impl PipAlgorithm for Grid {
    type State = Option<GridSet>;

    fn name(&self) -> &'static str {
        GRID
    }

    fn cost_model(&self) -> CostModel {
        CostModel::PerResolution
    }

    fn setup(&self, poly: &Polygon) -> Option<GridSet> {
        let bbox = poly.bbox()?;
        let res = self.resolution;
        let ext = bbox.extent();
        let size = |e: f64| if e > 0.0 { e / res as f64 } else { 1.0 };
        let mut set = GridSet {
            bbox,
            cell: Vector2::new(size(ext.x), size(ext.y)),
            res,
            cells: vec![
                Cell {
                    reference: Vector2::zeros(),
                    reference_inside: false,
                    edges: Vec::new(),
                };
                res * res
            ],
        };
        for (a, b) in poly.edges() {
            let (x0, y0) = set.index(a.inf(&b));
            let (x1, y1) = set.index(a.sup(&b));
            for iy in y0..=y1 {
                for ix in x0..=x1 {
                    set.cells[iy * res + ix].edges.push((a, b));
                }
            }
        }
        for iy in 0..res {
            for ix in 0..res {
                let k = iy * res + ix;
                let c = set.reference(ix, iy, &set.cells[k].edges);
                set.cells[k].reference = c;
                set.cells[k].reference_inside = crossing_parity(poly.edges(), c);
            }
        }
        Some(set)
    }

    fn test(&self, state: &Option<GridSet>, _poly: &Polygon, p: Vector2<f64>) -> bool {
        let Some(set) = state else {
            return false;
        };
        if !set.bbox.contains(p) {
            return false;
        }
        let (ix, iy) = set.index(p);
        let cell = &set.cells[iy * set.res + ix];
        cell.edges
            .iter()
            .filter(|(a, b)| segments_cross(cell.reference, p, *a, *b))
            .fold(cell.reference_inside, |inside, _| !inside)
    }
}
