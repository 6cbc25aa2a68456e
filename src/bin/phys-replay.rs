//! Headless replay of a frame set.
//!
//! Loads every frame, runs the scene loop for a fixed number of ticks on each
//! and prints what the simulation did.
//!
//! Usage: cargo run --bin phys-replay -- --ticks 600

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use phys_viewer::scenes::load_frames;
use phys_viewer::{
    Camera, ConfigError, DemoWorld, FrameSetError, InputEvent, SceneController,
    SceneRenderer, ViewError, ViewerConfig, Viewport,
};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Replay a frame set without a window")]
struct Args {
    /// Frame set to replay (defaults to the built-in one).
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticks to run per frame.
    #[arg(short, long, default_value_t = 240)]
    ticks: u32,

    /// Replay only the frame at this index.
    #[arg(long)]
    only: Option<usize>,

    /// Width of the virtual viewport used for visibility counts.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Height of the virtual viewport.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Error, Debug)]
enum ReplayError {
    #[error(transparent)]
    Frames(#[from] FrameSetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("invalid progress template: {0}")]
    Template(#[from] indicatif::style::TemplateError),
}

/// Collects per-frame statistics instead of drawing.
#[derive(Debug, Default)]
struct StatsRecorder {
    ticks: u32,
    max_speed: f64,
    lowest: f64,
    contacts: usize,
    /// Bodies inside the camera's visible area on the last tick.
    visible: usize,
    bodies: usize,
}

impl StatsRecorder {
    fn new() -> Self {
        Self {
            lowest: f64::INFINITY,
            ..Default::default()
        }
    }
}

impl SceneRenderer<DemoWorld> for StatsRecorder {
    fn render(&mut self, camera: &Camera, world: &DemoWorld) {
        let area = camera.visible_world_rect();
        self.ticks += 1;
        self.bodies = world.bodies().len();
        self.contacts += world.contacts().len();
        self.visible = 0;
        for body in world.bodies() {
            self.max_speed = self.max_speed.max(body.velocity.length());
            self.lowest = self.lowest.min(body.aabb().0.y);
            if area.contains(body.position) {
                self.visible += 1;
            }
        }
    }
}

fn run(args: Args) -> Result<(), ReplayError> {
    let config = ViewerConfig::load(args.config.as_deref())?;
    let set = load_frames(args.frames.as_deref())?;

    let camera = Camera::new(Viewport::from_size(args.width, args.height)?, config.camera);
    let mut scene = SceneController::new(DemoWorld::new(), camera, config.scene);
    // Replay always runs the simulation.
    scene.set_paused(false);
    for frame in set.into_handles() {
        scene.register_frame(frame);
    }
    scene.init_frame()?;

    let indices: Vec<usize> = match args.only {
        Some(index) => vec![index],
        None => (0..scene.frames().len()).collect(),
    };

    let total = indices.len() as u64 * u64::from(args.ticks);
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let dt = scene.config().physics_dt();
    println!(
        "Replaying {} frame(s), {} ticks each at dt = {:.4}s",
        indices.len(),
        args.ticks,
        dt
    );

    for index in indices {
        scene.jump_to_frame(index)?;
        let name = scene
            .frames()
            .current()
            .map(|f| f.name().to_string())
            .unwrap_or_default();
        progress.set_message(name.clone());

        let mut stats = StatsRecorder::new();
        for _ in 0..args.ticks {
            scene.tick(std::iter::empty::<InputEvent>(), &mut stats)?;
            progress.inc(1);
        }

        let lowest = if stats.lowest.is_finite() {
            format!("{:.2} m", stats.lowest)
        } else {
            "-".to_string()
        };
        progress.println(format!(
            "  [{index}] {name}: {} bodies ({} visible), max speed {:.2} m/s, lowest {lowest}, {} contacts over {:.2}s",
            stats.bodies,
            stats.visible,
            stats.max_speed,
            stats.contacts,
            f64::from(stats.ticks) * dt,
        ));
    }

    progress.finish_and_clear();
    log::info!("Replay finished after {} ticks", scene.ticks());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
