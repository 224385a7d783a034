//! Random test polygons and probe points.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π) with one random global
//!   phase, place vertices on a circle of `radius`, add independent uniform
//!   jitter in `[-perturbation, perturbation]` per axis, then snap to the grid.
//! - Normalize: translate the bbox center to the origin and scale uniformly so
//!   the longer bbox side becomes `2 / box_ratio`.
//! - Probe points are drawn from `[-range_x, range_x] × [-range_y, range_y]`,
//!   where the longer axis has range 1.
//!
//! Perturbation larger than the radius yields self-intersecting or concave
//! rings on purpose; nothing here rejects them.

use super::snap::snap;
use super::types::{Polygon, MAX_VERTICES};
use crate::config::GenerationConfig;
use nalgebra::Vector2;
use rand::Rng;
use std::f64::consts::TAU;

/// Half-widths of the probe sampling box; the longer axis is always 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleBox {
    pub range_x: f64,
    pub range_y: f64,
}

impl Default for SampleBox {
    fn default() -> Self {
        Self {
            range_x: 1.0,
            range_y: 1.0,
        }
    }
}

/// Draw the vertex count uniformly from `[min_vertices, max_vertices]`.
pub fn draw_vertex_count<R: Rng>(cfg: &GenerationConfig, rng: &mut R) -> usize {
    let lo = cfg.min_vertices.clamp(3, MAX_VERTICES);
    let hi = cfg.max_vertices.clamp(lo, MAX_VERTICES);
    rng.gen_range(lo..=hi)
}

/// Draw a polygon around the origin, snapped but not normalized.
pub fn draw_raw_polygon<R: Rng>(cfg: &GenerationConfig, rng: &mut R) -> Polygon {
    let n = draw_vertex_count(cfg, rng);
    let phase = rng.gen::<f64>() * TAU;
    let delta = TAU / n as f64;
    let verts = (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta;
            let jx = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.perturbation;
            let jy = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.perturbation;
            let v = Vector2::new(th.cos() * cfg.radius + jx, th.sin() * cfg.radius + jy);
            snap(v, cfg.grid_increment)
        })
        .collect();
    Polygon::new(verts)
}

/// Center the polygon's bbox on the origin and scale the longer side to `2 / box_ratio`.
///
/// Returns the probe sampling box. A polygon collapsed to a single point is
/// only translated and gets the unit sampling box.
pub fn normalize(poly: &mut Polygon, box_ratio: f64) -> SampleBox {
    let Some(bb) = poly.bbox() else {
        return SampleBox::default();
    };
    let off = bb.center();
    let ext = bb.extent();
    let (long, sample) = if ext.x > ext.y {
        (
            ext.x,
            SampleBox {
                range_x: 1.0,
                range_y: ext.y / ext.x,
            },
        )
    } else {
        (
            ext.y,
            SampleBox {
                range_x: ext.x / ext.y,
                range_y: 1.0,
            },
        )
    };
    if !(long > 0.0) {
        tracing::debug!(vertices = poly.len(), "degenerate polygon, skipping rescale");
        for v in poly.vertices_mut() {
            *v -= off;
        }
        return SampleBox::default();
    }
    let scale = 2.0 / (box_ratio * long);
    for v in poly.vertices_mut() {
        *v = (*v - off) * scale;
    }
    sample
}

/// Draw, snap and normalize one test polygon.
pub fn generate_polygon<R: Rng>(cfg: &GenerationConfig, rng: &mut R) -> (Polygon, SampleBox) {
    let mut poly = draw_raw_polygon(cfg, rng);
    let sample = normalize(&mut poly, cfg.box_ratio);
    (poly, sample)
}

/// Draw one probe point from the sampling box, snapped to the grid.
pub fn generate_point<R: Rng>(sample: SampleBox, grid_increment: f64, rng: &mut R) -> Vector2<f64> {
    let x = rng.gen::<f64>() * sample.range_x * 2.0 - sample.range_x;
    let y = rng.gen::<f64>() * sample.range_y * 2.0 - sample.range_y;
    snap(Vector2::new(x, y), grid_increment)
}
