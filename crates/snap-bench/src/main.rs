use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use float_wm::geometry::Point;
use float_wm::tracing_sub;
use float_wm::{
    Bounds, CreateWindowInput, Rect, ResizeDirection, WindowId, WindowManager, WmOptions,
};

const DIRECTIONS: [ResizeDirection; 8] = [
    ResizeDirection::N,
    ResizeDirection::E,
    ResizeDirection::S,
    ResizeDirection::W,
    ResizeDirection::NE,
    ResizeDirection::NW,
    ResizeDirection::SE,
    ResizeDirection::SW,
];

#[derive(Parser, Debug)]
#[command(
    name = "snap-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag/snap benchmark for window manager geometry"
)]
struct BenchCli {
    /// Windows open on the surface while dragging.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 24)]
    windows: usize,

    /// Number of drag gestures to run.
    #[arg(short = 'i', long = "iterations", value_name = "COUNT", default_value_t = 5_000)]
    iterations: u64,

    /// Pointer updates per gesture.
    #[arg(long = "steps", value_name = "COUNT", default_value_t = 12)]
    steps: u32,

    /// Snap positions to a grid of this size.
    #[arg(long = "grid", value_name = "PX")]
    grid: Option<f64>,

    /// Disable snapping to the container edges.
    #[arg(long = "no-edge-snap")]
    no_edge_snap: bool,

    /// Snap to the edges of other windows.
    #[arg(long = "window-snap")]
    window_snap: bool,

    /// Container size as WIDTHxHEIGHT.
    #[arg(long = "bounds", value_name = "WxH", default_value = "1920x1080", value_parser = parse_bounds)]
    bounds: Bounds,

    /// Seed for the pointer path; defaults to the clock.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Log manager activity to stderr.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn parse_bounds(raw: &str) -> Result<Bounds, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {raw:?}"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width {w:?}"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height {h:?}"))?;
    Ok(Bounds::new(w, h))
}

struct BenchConfig {
    windows: usize,
    iterations: u64,
    steps: u32,
    bounds: Bounds,
    seed: u64,
    options: WmOptions,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=4_096).contains(&cli.windows) {
            return Err("windows must be between 1 and 4096".to_string());
        }
        if cli.iterations == 0 {
            return Err("iterations must be at least 1".to_string());
        }
        if !(1..=1_000).contains(&cli.steps) {
            return Err("steps must be between 1 and 1000".to_string());
        }
        if !cli.bounds.is_constrained() {
            return Err("bounds must have a positive width and height".to_string());
        }
        let mut options = WmOptions::default()
            .with_edge_snap(!cli.no_edge_snap)
            .with_window_snap(cli.window_snap)
            .with_guides(true);
        if let Some(size) = cli.grid {
            if size <= 1.0 {
                return Err("grid size must be greater than 1".to_string());
            }
            options = options.with_grid(true, size);
        }
        Ok(Self {
            windows: cli.windows,
            iterations: cli.iterations,
            steps: cli.steps,
            bounds: cli.bounds,
            seed: cli.seed.unwrap_or_else(seed_from_clock),
            options,
        })
    }
}

fn main() -> ExitCode {
    let args = BenchCli::parse();
    let config = match BenchConfig::try_from(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("snap-bench: {msg}");
            return ExitCode::FAILURE;
        }
    };
    if args.verbose {
        tracing_sub::init_with_filter(tracing::Level::TRACE);
    }

    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));
    ExitCode::SUCCESS
}

fn populate(wm: &mut WindowManager<()>, config: &BenchConfig, rng: &mut Lcg) -> Vec<WindowId> {
    let b = config.bounds;
    (0..config.windows)
        .map(|n| {
            let w = rng.range(config.options.min_width, (b.w / 2.0).max(config.options.min_width));
            let h = rng.range(config.options.min_height, (b.h / 2.0).max(config.options.min_height));
            let rect = Rect::new(
                rng.range(0.0, (b.w - w).max(0.0)),
                rng.range(0.0, (b.h - h).max(0.0)),
                w,
                h,
            );
            wm.open_window(CreateWindowInput::new(format!("bench {n}"), Rc::new(())).rect(rect))
        })
        .collect()
}

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let mut rng = Lcg::new(config.seed);
    let mut wm = WindowManager::<()>::new();
    let ids = populate(&mut wm, config, &mut rng);
    let mut stats = BenchStats::new();

    for i in 0..config.iterations {
        let id = ids[rng.index(ids.len())];
        wm.activate_window(id);

        let origin = Point::new(rng.range(0.0, config.bounds.w), rng.range(0.0, config.bounds.h));
        let session = if i % 2 == 0 {
            wm.begin_move_drag(id, origin, &config.options)
        } else {
            let direction = DIRECTIONS[rng.index(DIRECTIONS.len())];
            wm.begin_resize_drag(id, direction, origin, &config.options)
        };
        let Some(session) = session else {
            stats.refused = stats.refused.saturating_add(1);
            continue;
        };

        let mut pointer = origin;
        for _ in 0..config.steps {
            pointer.x += rng.range(-40.0, 40.0);
            pointer.y += rng.range(-40.0, 40.0);
            let started = Instant::now();
            let guides = wm.update_drag(&session, pointer, config.bounds, &config.options);
            stats.record_update(started.elapsed(), guides.is_some_and(|g| !g.is_empty()));
        }
    }

    stats.mark_completed();
    stats
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    updates: u64,
    snapped: u64,
    refused: u64,
    total_update_time: Duration,
    fastest_update: Duration,
    slowest_update: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            updates: 0,
            snapped: 0,
            refused: 0,
            total_update_time: Duration::ZERO,
            fastest_update: Duration::MAX,
            slowest_update: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_update(&mut self, took: Duration, snapped: bool) {
        self.updates = self.updates.saturating_add(1);
        if snapped {
            self.snapped = self.snapped.saturating_add(1);
        }
        self.total_update_time += took;
        if took < self.fastest_update {
            self.fastest_update = took;
        }
        if took > self.slowest_update {
            self.slowest_update = took;
        }
    }

    fn average_update_us(&self) -> f64 {
        if self.updates == 0 {
            return 0.0;
        }
        (self.total_update_time.as_secs_f64() / self.updates as f64) * 1_000_000.0
    }

    fn fastest_update_us(&self) -> f64 {
        if self.updates == 0 {
            return 0.0;
        }
        self.fastest_update.as_secs_f64() * 1_000_000.0
    }

    fn slowest_update_us(&self) -> f64 {
        if self.updates == 0 {
            return 0.0;
        }
        self.slowest_update.as_secs_f64() * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let updates_per_second = if elapsed > 0.0 {
            self.updates as f64 / elapsed
        } else {
            0.0
        };
        let snap_ratio = if self.updates > 0 {
            self.snapped as f64 / self.updates as f64 * 100.0
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Snap bench completed (seed {seed}).
            Windows: {windows} | Gestures: {gestures} ({refused} refused) | Steps: {steps}
            Wall time: {elapsed:.2}s | Updates: {updates} (~{ups:.0}/s)
            Avg update: {avg:.2} us | Best: {best:.2} us | Worst: {worst:.2} us
            Updates with guides: {snapped} ({ratio:.1}%)
            "#,
            seed = config.seed,
            windows = config.windows,
            gestures = config.iterations,
            refused = self.refused,
            steps = config.steps,
            elapsed = elapsed,
            updates = self.updates,
            ups = updates_per_second,
            avg = self.average_update_us(),
            best = self.fastest_update_us(),
            worst = self.slowest_update_us(),
            snapped = self.snapped,
            ratio = snap_ratio,
        )
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ 0xA5A5_A5A5_1234_5678
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn unit(&mut self) -> f64 {
        self.next() as f64 / u32::MAX as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    fn index(&mut self, len: usize) -> usize {
        self.next() as usize % len
    }
}
