#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod colors;
mod constants;
mod painter;
mod ui;
mod watcher;

use clap::Parser;
use constants::LAYERS_KEY;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use phys_viewer::scenes::load_frames;
use phys_viewer::{Camera, DemoWorld, LayerVisibility, SceneController, ViewerConfig, Viewport};
use std::path::PathBuf;
use watcher::FramesWatcher;

/// Interactive viewer for 2D physics frame sets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Frame set to load instead of the built-in one; reloaded when it changes.
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial window width.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial window height.
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Start with the simulation paused.
    #[arg(long)]
    paused: bool,
}

/// Main application state for the physics viewer.
pub struct ViewerApp {
    scene: SceneController<DemoWorld>,
    frames_path: Option<PathBuf>,
    watcher: Option<FramesWatcher>,
    toasts: Toasts,
    /// Size of the scene rect the camera viewport was last fitted to.
    scene_size: egui::Vec2,
}

impl ViewerApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let mut config_error = None;
        let mut config = ViewerConfig::load(args.config.as_deref()).unwrap_or_else(|err| {
            config_error = Some(err.to_string());
            ViewerConfig::default()
        });
        if args.paused {
            config.scene.start_paused = true;
        }

        let mut camera = Camera::new(
            Viewport::from_size(f64::from(args.width), f64::from(args.height))
                .unwrap_or_default(),
            config.camera,
        );
        if let Some(layers) = cc
            .storage
            .and_then(|s| eframe::get_value::<LayerVisibility>(s, LAYERS_KEY))
        {
            *camera.layers_mut() = layers;
        }

        let watcher = args
            .frames
            .as_deref()
            .and_then(|path| FramesWatcher::new(path, cc.egui_ctx.clone()));
        if args.frames.is_some() && watcher.is_none() {
            log::info!("Frames watcher not available - hot reload disabled");
        }

        let mut app = Self {
            scene: SceneController::new(DemoWorld::new(), camera, config.scene),
            frames_path: args.frames,
            watcher,
            toasts,
            scene_size: egui::Vec2::ZERO,
        };

        if let Some(err) = config_error {
            app.notify(ToastKind::Error, err);
        }
        app.reload_frames();
        app
    }

    /// Shows a toast in the top-right corner.
    pub fn notify(&mut self, kind: ToastKind, text: impl Into<String>) {
        let seconds = if matches!(kind, ToastKind::Error) {
            10.0
        } else {
            3.0
        };
        let text: String = text.into();
        self.toasts.add(Toast {
            kind,
            text: text.into(),
            options: ToastOptions::default()
                .duration_in_seconds(seconds)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Replaces the frame library with the configured frame set and starts
    /// on the frame that was showing before, when it still exists.
    fn reload_frames(&mut self) {
        let set = match load_frames(self.frames_path.as_deref()) {
            Ok(set) => set,
            Err(err) => {
                log::error!("Failed to load frames: {err}");
                self.notify(ToastKind::Error, err.to_string());
                return;
            }
        };

        let previous = self.scene.frames().cursor();
        self.scene.clear_frames();
        for frame in set.into_handles() {
            self.scene.register_frame(frame);
        }

        if let Err(err) = self.scene.init_frame() {
            self.notify(ToastKind::Error, err.to_string());
            return;
        }
        if previous > 0
            && previous < self.scene.frames().len()
            && let Err(err) = self.scene.jump_to_frame(previous)
        {
            self.notify(ToastKind::Error, err.to_string());
        }
    }

    /// Reloads the frame set if the watched file changed.
    fn poll_frames_file(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        if !watcher.poll() {
            return;
        }
        let path = watcher.path().display().to_string();
        log::info!("{path} changed, reloading");
        self.reload_frames();
        self.notify(ToastKind::Info, format!("Reloaded {path}"));
    }

    /// Jumps to a frame picked in the sidebar.
    fn select_frame(&mut self, index: usize) {
        if let Err(err) = self.scene.jump_to_frame(index) {
            self.notify(ToastKind::Error, err.to_string());
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_frames_file();

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, LAYERS_KEY, self.scene.camera().layers());
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_title("Physics Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Physics Viewer",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc, args)))),
    )
}
