//! Grid constrainer: snap coordinates to a regular lattice through the origin.
//!
//! Each coordinate drops its remainder modulo the increment and moves one more
//! step away from zero when that remainder exceeds half an increment, so ties
//! at exactly half a step stay on the lower-magnitude grid line. Snapped points
//! land on polygon edges far more often; plugins disagree on such points and
//! the oracle only reports it.

use nalgebra::Vector2;

/// Snap a single coordinate. `increment <= 0` is the identity.
#[inline]
pub fn snap_coord(v: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return v;
    }
    // `%` on f64 is fmod: the remainder keeps the sign of `v`.
    let rem = v % increment;
    let mut out = v - rem;
    if rem.abs() > increment * 0.5 {
        out += if rem > 0.0 { increment } else { -increment };
    }
    out
}

/// Snap both coordinates of `p` independently.
#[inline]
pub fn snap(p: Vector2<f64>, increment: f64) -> Vector2<f64> {
    Vector2::new(snap_coord(p.x, increment), snap_coord(p.y, increment))
}
