//! Mock plugins for lifecycle, oracle and tally tests.

use super::{PipAlgorithm, Precondition};
use crate::geom2::Polygon;
use nalgebra::Vector2;
use std::cell::RefCell;
use std::rc::Rc;

/// Always answers `verdict`.
pub(crate) struct Fixed {
    name: &'static str,
    verdict: bool,
    precondition: Precondition,
}

impl Fixed {
    pub(crate) fn new(name: &'static str, verdict: bool) -> Self {
        Self {
            name,
            verdict,
            precondition: Precondition::None,
        }
    }

    pub(crate) fn convex_only(name: &'static str, verdict: bool) -> Self {
        Self {
            precondition: Precondition::ConvexOnly,
            ..Self::new(name, verdict)
        }
    }
}

impl PipAlgorithm for Fixed {
    type State = ();

    fn name(&self) -> &'static str {
        self.name
    }

    fn precondition(&self) -> Precondition {
        self.precondition
    }

    fn setup(&self, _poly: &Polygon) {}

    fn test(&self, _state: &(), _poly: &Polygon, _p: Vector2<f64>) -> bool {
        self.verdict
    }
}

/// Lifecycle call log shared between a `Counting` plugin and the test body.
#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub setups: usize,
    pub tests: usize,
    pub cleanups: usize,
    /// Tests observed outside a setup/cleanup pair.
    pub stray_tests: usize,
    /// Vertex count of every polygon seen by setup, in order.
    pub polygon_sizes: Vec<usize>,
    live: bool,
}

/// Records every lifecycle call; answers by a caller-supplied rule.
pub(crate) struct Counting {
    name: &'static str,
    calls: Rc<RefCell<Calls>>,
    rule: fn(Vector2<f64>) -> bool,
}

/// State handle that remembers which polygon it was built for.
pub(crate) struct Token {
    vertices: usize,
}

impl Counting {
    pub(crate) fn new(
        name: &'static str,
        rule: fn(Vector2<f64>) -> bool,
    ) -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (
            Self {
                name,
                calls: Rc::clone(&calls),
                rule,
            },
            calls,
        )
    }
}

impl PipAlgorithm for Counting {
    type State = Token;

    fn name(&self) -> &'static str {
        self.name
    }

    fn setup(&self, poly: &Polygon) -> Token {
        let mut c = self.calls.borrow_mut();
        c.setups += 1;
        c.live = true;
        c.polygon_sizes.push(poly.len());
        Token {
            vertices: poly.len(),
        }
    }

    fn test(&self, state: &Token, poly: &Polygon, p: Vector2<f64>) -> bool {
        let mut c = self.calls.borrow_mut();
        c.tests += 1;
        if !c.live || state.vertices != poly.len() {
            c.stray_tests += 1;
        }
        (self.rule)(p)
    }

    fn cleanup(&self, _state: Token) {
        let mut c = self.calls.borrow_mut();
        c.cleanups += 1;
        c.live = false;
    }
}
