//! 2D geometry for the harness: polygon/point types, the random generator and
//! the grid constrainer.
//!
//! Purpose
//! - Produce parameterized random test polygons (regular, jittered or fully
//!   random) and probe points in a box scaled from the polygon's bbox.
//! - Keep the geometry explicit: plain `Vector2<f64>` points, no tolerances
//!   beyond the grid increment.

pub mod rand;
pub mod snap;
mod types;

pub use self::rand::{generate_point, generate_polygon, SampleBox};
pub use snap::snap;
pub use types::{cross, orient, Aabb2, Hs2, Polygon, MAX_VERTICES};
