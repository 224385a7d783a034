//! Final run summary: counts, inside ratio and normalized per-test timings.

use crate::algo::{Registry, GRID, TRAPEZOID};
use crate::config::{BenchConfig, GenerationConfig};
use serde::Serialize;
use std::fmt;

/// One enabled plugin's line in the report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub name: String,
    pub tests_run: u64,
    pub mismatches: u64,
    /// Present only when timing was enabled.
    pub ns_per_test: Option<f64>,
}

/// Aggregate outcome of a benchmark run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub generation: GenerationConfig,
    pub trapezoid_bins: Option<usize>,
    pub grid_resolution: Option<usize>,
    pub convex: bool,
    pub timing: bool,
    pub total_points: u64,
    pub inside_points: u64,
    pub inside_percent: f64,
    pub algorithms: Vec<AlgorithmSummary>,
}

impl RunReport {
    pub fn new(
        cfg: &BenchConfig,
        registry: &Registry,
        inside_points: u64,
        total_points: u64,
    ) -> Self {
        let inside_percent = if total_points == 0 {
            0.0
        } else {
            inside_points as f64 * 100.0 / total_points as f64
        };
        let algorithms = registry
            .enabled()
            .map(|r| AlgorithmSummary {
                name: r.name().to_string(),
                tests_run: r.stats.tests_run,
                mismatches: r.stats.mismatches,
                ns_per_test: if cfg.timing.enabled {
                    r.stats.ns_per_test()
                } else {
                    None
                },
            })
            .collect();
        Self {
            generation: cfg.generation.clone(),
            trapezoid_bins: registry
                .is_enabled(TRAPEZOID)
                .then_some(cfg.tuning.trapezoid_bins),
            grid_resolution: registry.is_enabled(GRID).then_some(cfg.tuning.grid_resolution),
            convex: cfg.convex,
            timing: cfg.timing.enabled,
            total_points,
            inside_points,
            inside_percent,
            algorithms,
        }
    }

    pub fn total_mismatches(&self) -> u64 {
        self.algorithms.iter().map(|a| a.mismatches).sum()
    }

    /// The parameter header, e.g. "Polygons with 3 to 6 vertices, radius 1, ...".
    pub fn header(&self) -> String {
        let g = &self.generation;
        let mut s = if g.min_vertices == g.max_vertices {
            format!("Polygons with {} vertices", g.min_vertices)
        } else {
            format!("Polygons with {} to {} vertices", g.min_vertices, g.max_vertices)
        };
        s += &format!(
            ", radius {}, perturbation +/- {}, bounding box scale {}",
            g.radius, g.perturbation, g.box_ratio
        );
        if g.grid_increment > 0.0 {
            s += &format!(", grid increment {}", g.grid_increment);
        }
        if let Some(bins) = self.trapezoid_bins {
            s += &format!(", {bins} trapezoid bins");
        }
        if let Some(res) = self.grid_resolution {
            s += &format!(", {res} grid resolution");
        }
        if self.convex {
            s += ", convex";
        }
        s.push('.');
        s
    }
}

/// Greedy word wrap to at most `width` columns per line.
pub fn wrap_columns(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut col = 0;
    for word in text.split(' ') {
        if col > 0 && col + 1 + word.len() > width {
            out.push('\n');
            col = 0;
        } else if col > 0 {
            out.push(' ');
            col += 1;
        }
        out.push_str(word);
        col += word.len();
    }
    out
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", wrap_columns(&self.header(), 80))?;
        writeln!(
            f,
            " Testing {} polygons with {} points",
            self.generation.polygon_count, self.generation.points_per_polygon
        )?;
        writeln!(f, "{:.2} % of all points were inside polygons", self.inside_percent)?;
        if self.timing {
            for a in &self.algorithms {
                match a.ns_per_test {
                    Some(ns) => {
                        writeln!(f, "  {} test time: {:.3} nanoseconds per test", a.name, ns)?
                    }
                    None => writeln!(f, "  {} test time: n/a", a.name)?,
                }
            }
        }
        let mismatches = self.total_mismatches();
        if mismatches > 0 {
            writeln!(f, "{mismatches} disagreements with the reference test")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    fn cfg(algos: &[&str]) -> BenchConfig {
        BenchConfig {
            algorithms: algos.iter().map(|s| s.to_string()).collect(),
            ..BenchConfig::default()
        }
    }

    #[test]
    fn empty_run_reports_zero_percent() {
        let c = cfg(&["crossings"]);
        let mut r = Registry::standard(&Tuning::default());
        r.enable(&c.algorithms, false).unwrap();
        let rep = RunReport::new(&c, &r, 0, 0);
        assert_eq!(rep.inside_percent, 0.0);
        assert!(rep.to_string().contains("0.00 % of all points were inside polygons"));
    }

    #[test]
    fn header_lists_tuning_only_for_enabled_plugins() {
        let c = cfg(&["grid", "crossings"]);
        let mut r = Registry::standard(&Tuning::default());
        r.enable(&c.algorithms, false).unwrap();
        let rep = RunReport::new(&c, &r, 1, 4);
        assert_eq!(
            rep.header(),
            "Polygons with 3 to 6 vertices, radius 1, perturbation +/- 0, bounding box scale 1, 20 grid resolution."
        );
        assert_eq!(rep.inside_percent, 25.0);
        assert!(rep.algorithms.iter().all(|a| a.ns_per_test.is_none()));
    }

    #[test]
    fn snapping_and_disagreements_are_reported() {
        let mut c = cfg(&["crossings", "weiler"]);
        c.generation.grid_increment = 0.25;
        let mut r = Registry::standard(&Tuning::default());
        r.enable(&c.algorithms, false).unwrap();
        let mut rep = RunReport::new(&c, &r, 1, 3);
        assert!(rep.header().contains(", grid increment 0.25."));
        let text = rep.to_string();
        assert!(text.contains("33.33 % of all points were inside polygons"));
        assert!(!text.contains("disagreements"));
        rep.algorithms[1].mismatches = 2;
        assert!(rep.to_string().contains("2 disagreements with the reference test"));
    }

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "Polygons with 3 to 6 vertices, radius 1, perturbation +/- 0, bounding box scale 1, 20 trapezoid bins, 20 grid resolution, convex.";
        let wrapped = wrap_columns(text, 80);
        assert!(wrapped.lines().count() >= 2);
        assert!(wrapped.lines().all(|l| l.len() <= 80));
        assert_eq!(wrapped.replace('\n', " "), text);
    }
}
