use anyhow::Result;
use clap::{CommandFactory, Parser};
use ptbench::algo::{
    ANGLE, BARYCENTRIC, CROSSINGS, CROSS_MULT, EXTERIOR, GRID, INCLUSION, TRAPEZOID, WEILER,
};
use ptbench::config::{BenchConfig, GenerationConfig, TimingCfg, Tuning};
use ptbench::driver::Benchmark;
use ptbench::error::BenchError;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

/// Point-in-polygon test harness: random polygons, cross-checked verdicts, timings.
#[derive(Parser, Debug)]
#[command(name = "ptbench")]
#[command(about = "Point in polygon inside/outside tester")]
#[command(override_usage = "ptbench [OPTIONS] -{ABCEGIMTW}")]
#[command(after_help = "The plane (-P) and Spackman (-S) tests are not available.")]
struct Cmd {
    /// Variation in number of polygon vertices: MIN [MAX]
    #[arg(short = 'v', num_args = 1..=2, value_names = ["MIN", "MAX"])]
    verts: Option<Vec<usize>>,
    /// Radius of polygon vertices generated
    #[arg(short = 'r', default_value_t = 1.0)]
    radius: f64,
    /// Perturbation of polygon vertices generated
    #[arg(short = 'p', default_value_t = 0.0)]
    perturbation: f64,
    /// Scale of test point box around polygon
    #[arg(short = 's', default_value_t = 1.0)]
    box_ratio: f64,
    /// Number of y bins for the trapezoid test
    #[arg(short = 'b', default_value_t = 20)]
    bins: usize,
    /// Grid resolution for the grid test
    #[arg(short = 'g', default_value_t = 20)]
    resolution: usize,
    /// Number of polygons to test
    #[arg(short = 'n', default_value_t = 20)]
    polygons: usize,
    /// Number of points to test per polygon
    #[arg(short = 'i', default_value_t = 20)]
    points: usize,
    /// Constrain polygon and test points to a grid with this increment (0 = off)
    #[arg(short = 'c', default_value_t = 0.0)]
    increment: f64,

    /// Angle summation test
    #[arg(short = 'A')]
    angle: bool,
    /// Barycentric (triangle fan) test
    #[arg(short = 'B')]
    barycentric: bool,
    /// Crossings test (reference for cross-validation)
    #[arg(short = 'C')]
    crossings: bool,
    /// Exterior edges test (convex only)
    #[arg(short = 'E')]
    exterior: bool,
    /// Grid test
    #[arg(short = 'G')]
    grid: bool,
    /// Inclusion test (convex only)
    #[arg(short = 'I')]
    inclusion: bool,
    /// Crossings-multiply test
    #[arg(short = 'M')]
    cross_mult: bool,
    /// Trapezoid (bin) test
    #[arg(short = 'T')]
    trapezoid: bool,
    /// Weiler quadrant test
    #[arg(short = 'W')]
    weiler: bool,

    /// Enable convex-only tests (polygons are assumed convex)
    #[arg(long)]
    convex: bool,
    /// Time each test; verdicts are unaffected
    #[arg(long)]
    timing: bool,
    /// Base trial budget per test when timing
    #[arg(long, default_value_t = TimingCfg::default().test_ratio)]
    test_ratio: u64,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Also write the JSON report to this path
    #[arg(long)]
    out: Option<String>,
}

impl Cmd {
    fn algorithms(&self) -> Vec<String> {
        [
            (self.angle, ANGLE),
            (self.barycentric, BARYCENTRIC),
            (self.crossings, CROSSINGS),
            (self.exterior, EXTERIOR),
            (self.grid, GRID),
            (self.inclusion, INCLUSION),
            (self.cross_mult, CROSS_MULT),
            (self.trapezoid, TRAPEZOID),
            (self.weiler, WEILER),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| name.to_string())
        .collect()
    }

    fn to_config(&self) -> BenchConfig {
        let defaults = GenerationConfig::default();
        let (min_vertices, max_vertices) = match self.verts.as_deref() {
            Some([min]) => (*min, *min),
            Some([min, max, ..]) => (*min, *max),
            _ => (defaults.min_vertices, defaults.max_vertices),
        };
        BenchConfig {
            generation: GenerationConfig {
                min_vertices,
                max_vertices,
                radius: self.radius,
                perturbation: self.perturbation,
                box_ratio: self.box_ratio,
                grid_increment: self.increment,
                polygon_count: self.polygons,
                points_per_polygon: self.points,
            },
            tuning: Tuning {
                grid_resolution: self.resolution,
                trapezoid_bins: self.bins,
            },
            timing: TimingCfg {
                enabled: self.timing,
                test_ratio: self.test_ratio,
            },
            convex: self.convex,
            seed: self.seed,
            algorithms: self.algorithms(),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = cmd.to_config();
    let mut bench = match Benchmark::from_config(cfg) {
        Ok(b) => b,
        Err(BenchError::Config(e)) => {
            tracing::error!("{e}");
            Cmd::command().print_help()?;
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(
        polygons = cmd.polygons,
        points = cmd.points,
        timing = cmd.timing,
        seed = ?cmd.seed,
        "run"
    );
    let report = bench.run()?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&provenance::Envelope::new(&report))?);
    } else {
        print!("{report}");
    }
    if let Some(out) = &cmd.out {
        let path = provenance::write_report(out, &report)?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
