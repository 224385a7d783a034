//! Cross-validation against a reference plugin.
//!
//! After every probe point, each enabled plugin's verdict is compared with the
//! reference's. Disagreements are advisory: they are logged and counted, and
//! the run continues. With the reference disabled nothing is compared.

use crate::algo::Registry;
use crate::geom2::Polygon;
use nalgebra::Vector2;
use std::fmt;

/// One disagreement, with everything needed to replay it offline.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    /// Registry index of the disagreeing plugin.
    pub index: usize,
    pub algorithm: &'static str,
    pub verdict: bool,
    pub reference: &'static str,
    pub reference_verdict: bool,
    pub point: Vector2<f64>,
    pub polygon: Vec<Vector2<f64>>,
}

fn says(inside: bool) -> &'static str {
    if inside {
        "INSIDE"
    } else {
        "OUTSIDE"
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} test says {}, {} test says {}; point {} {}; polygon ({} vertices):",
            self.algorithm,
            says(self.verdict),
            self.reference,
            says(self.reference_verdict),
            self.point.x,
            self.point.y,
            self.polygon.len()
        )?;
        for v in &self.polygon {
            write!(f, " {} {}", v.x, v.y)?;
        }
        Ok(())
    }
}

/// Compares every enabled plugin to the reference plugin's last verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Oracle {
    reference: Option<usize>,
}

impl Oracle {
    /// Use the registry entry named `name` as ground truth, if registered.
    pub fn with_reference(registry: &Registry, name: &str) -> Self {
        Self {
            reference: registry.index_of(name),
        }
    }

    pub fn reference(&self) -> Option<usize> {
        self.reference
    }

    /// Whether comparisons happen at all for this registry.
    pub fn is_active(&self, registry: &Registry) -> bool {
        self.reference
            .and_then(|i| registry.get(i))
            .is_some_and(|r| r.work)
    }

    /// Collect disagreements for the point whose verdicts the registry holds.
    pub fn check(&self, registry: &Registry, poly: &Polygon, p: Vector2<f64>) -> Vec<Mismatch> {
        let Some(ref_idx) = self.reference else {
            return Vec::new();
        };
        let Some(reference) = registry.get(ref_idx).filter(|r| r.work) else {
            return Vec::new();
        };
        let expected = reference.stats.last_verdict;
        registry
            .iter()
            .enumerate()
            .filter(|(i, r)| *i != ref_idx && r.work && r.stats.last_verdict != expected)
            .map(|(i, r)| Mismatch {
                index: i,
                algorithm: r.name(),
                verdict: r.stats.last_verdict,
                reference: reference.name(),
                reference_verdict: expected,
                point: p,
                polygon: poly.vertices().to_vec(),
            })
            .collect()
    }
}
