//! Benchmark driver: the polygon × probe-point double loop.
//!
//! Per polygon: generate + normalize, size trial batches, `setup` every enabled
//! plugin, then per point: generate, `test` every enabled plugin in
//! registration order, cross-check against the reference, tally. Finally
//! `cleanup` every plugin that was set up, even when the point loop failed or
//! had no points.

use crate::algo::{Registry, CROSSINGS};
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::geom2::{generate_point, generate_polygon, Polygon, SampleBox};
use crate::oracle::Oracle;
use crate::report::RunReport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inside/total counters across all polygons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub inside: u64,
    pub total: u64,
}

/// Owns the configuration, the plugin registry and the run's RNG.
pub struct Benchmark<R: Rng> {
    cfg: BenchConfig,
    registry: Registry,
    oracle: Oracle,
    rng: R,
}

impl Benchmark<StdRng> {
    /// Standard plugin set, RNG seeded from `cfg.seed` or OS entropy.
    pub fn from_config(cfg: BenchConfig) -> Result<Self, BenchError> {
        let registry = Registry::standard(&cfg.tuning);
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_registry(cfg, registry, rng)
    }
}

impl<R: Rng> Benchmark<R> {
    /// Validate `cfg` and enable its requested plugins in `registry`.
    ///
    /// The oracle's reference is the registry's crossings test, when present.
    pub fn with_registry(
        cfg: BenchConfig,
        mut registry: Registry,
        rng: R,
    ) -> Result<Self, BenchError> {
        cfg.validate()?;
        registry.enable(&cfg.algorithms, cfg.convex)?;
        let oracle = Oracle::with_reference(&registry, CROSSINGS);
        Ok(Self {
            cfg,
            registry,
            oracle,
            rng,
        })
    }

    /// Use a different reference plugin for cross-validation.
    pub fn with_reference(mut self, name: &str) -> Self {
        self.oracle = Oracle::with_reference(&self.registry, name);
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every polygon and point once and summarize.
    pub fn run(&mut self) -> Result<RunReport, BenchError> {
        let gen = self.cfg.generation.clone();
        let test_ratio = self.cfg.timing.enabled.then_some(self.cfg.timing.test_ratio);
        if !self.oracle.is_active(&self.registry) {
            tracing::debug!("reference test disabled, no cross-validation");
        }
        self.registry.reset_stats();
        let mut tally = Tally::default();
        for i in 0..gen.polygon_count {
            let (poly, sample) = generate_polygon(&gen, &mut self.rng);
            self.registry.plan_trials(poly.len(), test_ratio);
            self.registry.setup_all(&poly)?;
            let probed = self.probe(&poly, sample, &mut tally);
            let released = self.registry.cleanup_all();
            probed?;
            released?;
            tracing::debug!(
                polygon = i,
                vertices = poly.len(),
                inside = tally.inside,
                "polygon done"
            );
        }
        Ok(RunReport::new(&self.cfg, &self.registry, tally.inside, tally.total))
    }

    fn probe(
        &mut self,
        poly: &Polygon,
        sample: SampleBox,
        tally: &mut Tally,
    ) -> Result<(), BenchError> {
        let gen = &self.cfg.generation;
        for _ in 0..gen.points_per_polygon {
            let p = generate_point(sample, gen.grid_increment, &mut self.rng);
            self.registry.test_all(poly, p, self.cfg.timing.enabled)?;
            for m in self.oracle.check(&self.registry, poly, p) {
                tracing::warn!("{m}");
                if let Some(stats) = self.registry.stats_mut(m.index) {
                    stats.mismatches += 1;
                }
            }
            if self.registry.any_inside() {
                tally.inside += 1;
            }
            tally.total += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::testing::{Counting, Fixed};
    use crate::algo::{CROSS_MULT, EXTERIOR, WEILER};
    use crate::config::{GenerationConfig, TimingCfg};
    use crate::error::ConfigError;

    fn cfg(algos: &[&str], polygons: usize, points: usize) -> BenchConfig {
        BenchConfig {
            generation: GenerationConfig {
                polygon_count: polygons,
                points_per_polygon: points,
                ..GenerationConfig::default()
            },
            algorithms: algos.iter().map(|s| s.to_string()).collect(),
            seed: Some(1),
            ..BenchConfig::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn setup_and_cleanup_pair_up_per_polygon() {
        let mut r = Registry::new();
        let (a, calls_a) = Counting::new("a", |p| p.x > 0.0);
        let (b, calls_b) = Counting::new("b", |_| false);
        r.register(a);
        r.register(b);
        let mut bench = Benchmark::with_registry(cfg(&["a", "b"], 7, 5), r, rng()).unwrap();
        let rep = bench.run().unwrap();
        for calls in [calls_a, calls_b] {
            let c = calls.borrow();
            assert_eq!((c.setups, c.cleanups, c.tests, c.stray_tests), (7, 7, 35, 0));
            assert!(c.polygon_sizes.iter().all(|&n| (3..=6).contains(&n)));
        }
        assert_eq!(rep.total_points, 35);
    }

    #[test]
    fn zero_points_still_runs_setup_and_cleanup() {
        let mut r = Registry::new();
        let (a, calls) = Counting::new("a", |_| true);
        r.register(a);
        let mut bench = Benchmark::with_registry(cfg(&["a"], 1, 0), r, rng()).unwrap();
        let rep = bench.run().unwrap();
        let c = calls.borrow();
        assert_eq!((c.setups, c.tests, c.cleanups), (1, 0, 1));
        assert_eq!((rep.total_points, rep.inside_points), (0, 0));
        assert_eq!(rep.inside_percent, 0.0);
    }

    #[test]
    fn disabled_plugins_are_never_called() {
        let mut r = Registry::new();
        let (a, used) = Counting::new("a", |_| true);
        let (b, unused) = Counting::new("b", |_| true);
        r.register(a);
        r.register(b);
        Benchmark::with_registry(cfg(&["a"], 3, 3), r, rng())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(used.borrow().setups, 3);
        let u = unused.borrow();
        assert_eq!((u.setups, u.tests, u.cleanups), (0, 0, 0));
    }

    #[test]
    fn inside_tally_counts_points_any_plugin_accepts() {
        let mut r = Registry::new();
        let (left, _) = Counting::new("left", |p| p.x < -0.5);
        let (right, _) = Counting::new("right", |p| p.x > 0.5);
        r.register(left);
        r.register(right);
        let mut bench =
            Benchmark::with_registry(cfg(&["left", "right"], 10, 200), r, rng()).unwrap();
        let rep = bench.run().unwrap();

        // replay the same stream to count |x| > 0.5 directly
        let mut replay = rng();
        let gen = bench.config().generation.clone();
        let mut expected = 0;
        for _ in 0..gen.polygon_count {
            let (_, sample) = generate_polygon(&gen, &mut replay);
            for _ in 0..gen.points_per_polygon {
                let p = generate_point(sample, gen.grid_increment, &mut replay);
                if p.x.abs() > 0.5 {
                    expected += 1;
                }
            }
        }
        assert_eq!(rep.inside_points, expected);
        let pct = expected as f64 * 100.0 / 2000.0;
        assert!((rep.inside_percent - pct).abs() < 1e-12);
    }

    #[test]
    fn mismatches_are_counted_against_the_reference() {
        let mut r = Registry::new();
        r.register(Fixed::new(CROSSINGS, true));
        r.register(Fixed::new("yes", true));
        r.register(Fixed::new("no", false));
        let mut bench =
            Benchmark::with_registry(cfg(&[CROSSINGS, "yes", "no"], 2, 4), r, rng()).unwrap();
        let rep = bench.run().unwrap();
        let by_name = |n: &str| rep.algorithms.iter().find(|a| a.name == n).unwrap().mismatches;
        assert_eq!(by_name(CROSSINGS), 0);
        assert_eq!(by_name("yes"), 0);
        assert_eq!(by_name("no"), 8);
        assert_eq!(rep.inside_points, 8);
    }

    #[test]
    fn without_reference_nothing_is_flagged() {
        let mut r = Registry::new();
        r.register(Fixed::new(CROSSINGS, true));
        r.register(Fixed::new("no", false));
        let mut bench = Benchmark::with_registry(cfg(&["no"], 2, 4), r, rng()).unwrap();
        let rep = bench.run().unwrap();
        assert_eq!(rep.total_mismatches(), 0);
        assert_eq!(rep.inside_points, 0);
    }

    #[test]
    fn another_reference_can_be_chosen() {
        let mut r = Registry::new();
        r.register(Fixed::new(CROSSINGS, false));
        r.register(Fixed::new("yes", true));
        r.register(Fixed::new("no", false));
        let mut bench = Benchmark::with_registry(cfg(&[CROSSINGS, "yes", "no"], 2, 4), r, rng())
            .unwrap()
            .with_reference("yes");
        let rep = bench.run().unwrap();
        let by_name = |n: &str| rep.algorithms.iter().find(|a| a.name == n).unwrap().mismatches;
        assert_eq!(by_name("yes"), 0);
        assert_eq!(by_name(CROSSINGS), 8);
        assert_eq!(by_name("no"), 8);
    }

    #[test]
    fn unregistered_reference_disables_cross_checks() {
        let mut r = Registry::new();
        r.register(Fixed::new(CROSSINGS, true));
        r.register(Fixed::new("no", false));
        let mut bench = Benchmark::with_registry(cfg(&[CROSSINGS, "no"], 2, 4), r, rng())
            .unwrap()
            .with_reference("missing");
        assert_eq!(bench.run().unwrap().total_mismatches(), 0);
    }

    #[test]
    fn repeated_runs_start_from_fresh_statistics() {
        let mut r = Registry::new();
        r.register(Fixed::new(CROSSINGS, true));
        r.register(Fixed::new("no", false));
        let mut bench =
            Benchmark::with_registry(cfg(&[CROSSINGS, "no"], 2, 5), r, rng()).unwrap();
        let first = bench.run().unwrap();
        let second = bench.run().unwrap();
        for rep in [&first, &second] {
            assert_eq!(rep.total_points, 10);
            assert!(rep.algorithms.iter().all(|a| a.tests_run == 10));
            assert_eq!(rep.total_mismatches(), 10);
        }
        assert_eq!(first.algorithms, second.algorithms);
    }

    #[test]
    fn standard_plugins_run_end_to_end() {
        let mut c = cfg(&[CROSSINGS, CROSS_MULT, WEILER, "grid", "trapezoid", "angle"], 10, 100);
        c.generation.min_vertices = 3;
        c.generation.max_vertices = 12;
        let mut bench = Benchmark::from_config(c).unwrap();
        let rep = bench.run().unwrap();
        assert_eq!(rep.algorithms.len(), 6);
        assert!(rep.inside_points > 0 && rep.inside_points < rep.total_points);
    }

    #[test]
    fn convex_only_request_without_convex_mode_is_skipped() {
        let mut bench = Benchmark::from_config(cfg(&[CROSSINGS, EXTERIOR], 1, 1)).unwrap();
        assert!(!bench.registry().is_enabled(EXTERIOR));
        let rep = bench.run().unwrap();
        assert_eq!(rep.algorithms.len(), 1);
    }

    #[test]
    fn configuration_errors_abort_before_running() {
        let err = Benchmark::from_config(cfg(&[], 1, 1)).err().unwrap();
        assert!(matches!(err, BenchError::Config(ConfigError::NoAlgorithm)));
        let err = Benchmark::from_config(cfg(&["nope"], 1, 1)).err().unwrap();
        assert!(matches!(err, BenchError::Config(ConfigError::UnknownAlgorithm(_))));
    }

    #[test]
    fn timing_batches_do_not_change_verdicts() {
        let mut untimed = cfg(&[CROSSINGS, "grid", "trapezoid"], 4, 30);
        untimed.seed = Some(9);
        let mut timed = untimed.clone();
        timed.timing = TimingCfg {
            enabled: true,
            test_ratio: 60,
        };
        let a = Benchmark::from_config(untimed).unwrap().run().unwrap();
        let b = Benchmark::from_config(timed).unwrap().run().unwrap();
        assert_eq!(a.inside_points, b.inside_points);
        assert!(a.algorithms.iter().all(|s| s.tests_run == 120 && s.ns_per_test.is_none()));
        for s in &b.algorithms {
            assert!(s.tests_run > 120, "{} ran {}", s.name, s.tests_run);
            assert!(s.ns_per_test.is_some());
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let c = cfg(&[CROSSINGS, WEILER], 5, 50);
        let a = Benchmark::from_config(c.clone()).unwrap().run().unwrap();
        let b = Benchmark::from_config(c).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn square_centroid_scenario() {
        let mut c = cfg(&[CROSSINGS], 1, 0);
        c.generation.min_vertices = 4;
        c.generation.max_vertices = 4;
        let mut rng = rng();
        let (poly, sample) = generate_polygon(&c.generation, &mut rng);
        assert_eq!(poly.len(), 4);
        assert!(poly.vertex_centroid().unwrap().norm() < 1e-12);
        assert_eq!(sample.range_x.max(sample.range_y), 1.0);
    }
}
