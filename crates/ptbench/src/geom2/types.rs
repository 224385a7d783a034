//! Basic 2D types shared by the generator and the plugins.
//!
//! - `Polygon`: ordered vertex ring (CCW by construction), bounded by `MAX_VERTICES`.
//! - `Aabb2`: axis-aligned bounding box with center/extent helpers.
//! - `Hs2`: closed half-space `n·x <= c`, used by half-plane based tests.

use nalgebra::Vector2;

/// Fixed polygon capacity (the generator never produces more vertices).
pub const MAX_VERTICES: usize = 1000;

/// Closed half‑space `n · x <= c` (no normalization required here).
#[derive(Clone, Copy, Debug)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Half-plane left of the directed edge `a → b` (interior side for CCW rings).
    #[inline]
    pub fn left_of(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        let e = b - a;
        // outward normal of a CCW edge is 90° CW: (e.y, -e.x)
        let n = Vector2::new(e.y, -e.x);
        Self::new(n, n.dot(&a))
    }

    #[inline]
    pub fn satisfies(&self, p: Vector2<f64>) -> bool {
        self.n.dot(&p) <= self.c
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Aabb2 {
    /// Bounding box of a point set; `None` when empty.
    pub fn from_points(pts: &[Vector2<f64>]) -> Option<Self> {
        let first = *pts.first()?;
        let mut min = first;
        let mut max = first;
        for p in &pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self) -> Vector2<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Ordered polygon vertex ring. The closing edge `last → first` is implicit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Wrap a vertex ring. Rings longer than `MAX_VERTICES` are truncated.
    pub fn new(mut verts: Vec<Vector2<f64>>) -> Self {
        if verts.len() > MAX_VERTICES {
            tracing::warn!(
                vertices = verts.len(),
                cap = MAX_VERTICES,
                "polygon exceeds capacity, truncating"
            );
            verts.truncate(MAX_VERTICES);
        }
        Self { verts }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub(crate) fn vertices_mut(&mut self) -> &mut [Vector2<f64>] {
        &mut self.verts
    }

    /// Directed edges `(v[i-1], v[i])`, starting with the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[(i + n - 1) % n], self.verts[i]))
    }

    pub fn bbox(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.verts)
    }

    /// Vertex average (equals the area centroid for regular polygons).
    pub fn vertex_centroid(&self) -> Option<Vector2<f64>> {
        if self.verts.is_empty() {
            return None;
        }
        let sum = self
            .verts
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, v| acc + v);
        Some(sum / self.verts.len() as f64)
    }
}

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
/// Positive when `a → b → c` turns counterclockwise.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    cross(b - a, c - a)
}

/// 2D cross product `u.x v.y - u.y v.x`.
#[inline]
pub fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}
