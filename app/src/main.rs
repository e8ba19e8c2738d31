mod cli;
mod input;

use std::time::{Duration, Instant};

use clap::Parser;
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle, TextureOptions, Vec2};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voxelspace::{Framebuffer, Scene, SceneConfig, loader, synth};

use cli::CliArgs;

// Side length of generated terrain
const SYNTH_SIZE: usize = 1024;
const SYNTH_ROUGHNESS: f32 = 0.55;
const SIDE_PANEL_WIDTH: f32 = 220.0;

struct VoxelApp {
    scene: Scene,
    frame: Framebuffer,
    texture: Option<TextureHandle>,
    canvas: Vec2,
    // zero means repaint continuously
    frame_interval: Duration,

    seed: u64,

    // timing & status
    last_duration: Option<f32>,
    status_message: String,
}

impl VoxelApp {
    fn new(scene: Scene, seed: u64) -> Self {
        let config = scene.config();
        let frame = Framebuffer::new(config.screen.width as usize, config.screen.height as usize);
        let canvas = Vec2::new(config.screen.canvas_width, config.screen.canvas_height);
        let frame_interval = match config.render.target_fps {
            0 => Duration::ZERO,
            fps => Duration::from_secs_f32(1.0 / fps as f32),
        };
        let status_message = if scene.terrain().is_empty() {
            "No terrain loaded; open maps or generate one".to_string()
        } else {
            String::new()
        };
        Self {
            scene,
            frame,
            texture: None,
            canvas,
            frame_interval,
            seed,
            last_duration: None,
            status_message,
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let image = ColorImage::from_rgba_unmultiplied(
            [self.frame.width(), self.frame.height()],
            self.frame.pixels(),
        );
        // Linear filtering smooths the upscale onto the canvas
        match &mut self.texture {
            Some(tex) => tex.set(image, TextureOptions::LINEAR),
            None => self.texture = Some(ctx.load_texture("frame", image, TextureOptions::LINEAR)),
        }
    }

    fn open_maps(&mut self) {
        let Some(height_map) = rfd::FileDialog::new()
            .set_title("Open height map")
            .add_filter("image", &["png", "jpg", "jpeg", "bmp", "gif"])
            .pick_file()
        else {
            return;
        };
        let Some(color_map) = rfd::FileDialog::new()
            .set_title("Open color map")
            .add_filter("image", &["png", "jpg", "jpeg", "bmp", "gif"])
            .pick_file()
        else {
            return;
        };

        let terrain = loader::load_terrain_or_empty(&height_map, &color_map);
        self.status_message = if terrain.is_empty() {
            format!("Could not load {}", height_map.display())
        } else {
            format!("Loaded {}×{} terrain", terrain.width(), terrain.height())
        };
        self.scene.set_terrain(terrain);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Voxel Space");
        ui.separator();

        let cam = *self.scene.camera();
        ui.label(format!("Position: {}, {}", cam.x, cam.y));
        ui.label(format!("Altitude: {}", cam.height));
        ui.label(format!("Horizon: {}", cam.horizon_pos));
        ui.small("W/S/A/D move, E/Q altitude, ↑/↓ pitch");
        if ui.button("Reset camera").clicked() {
            self.scene.reset_camera();
        }
        ui.separator();

        ui.label("View distance");
        let mut max_dist = self.scene.camera().max_dist;
        if ui.add(egui::Slider::new(&mut max_dist, 50..=3000)).changed() {
            self.scene.set_max_dist(max_dist);
        }

        ui.label("Quality (lower is finer)");
        let mut quality = self.scene.rasterizer().quality();
        if ui.add(egui::Slider::new(&mut quality, 0..=50)).changed() {
            self.scene.set_quality(quality);
        }
        ui.separator();

        if ui.button("Open maps…").clicked() {
            self.open_maps();
        }

        ui.horizontal(|ui| {
            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));
        });
        if ui.button("Generate terrain").clicked() {
            let start = Instant::now();
            self.scene
                .set_terrain(synth::generate(SYNTH_SIZE, self.seed, SYNTH_ROUGHNESS));
            self.status_message = format!(
                "Generated in {:.2} ms (seed {})",
                start.elapsed().as_secs_f32() * 1000.0,
                self.seed
            );
        }
        ui.separator();

        if ui.button("Save PNG…").clicked() {
            let filename = format!("voxelspace_{}_{}.png", cam.x, cam.y);
            self.status_message = match self.frame.save_png(&filename) {
                Ok(()) => format!("Saved {}", filename),
                Err(err) => format!("Save failed: {}", err),
            };
        }

        if ui.button("Save config…").clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("RON", &["ron"])
                .set_file_name("scene.ron")
                .save_file()
        {
            self.status_message = match self.scene.config().save(&path) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(err) => format!("Save failed: {}", err),
            };
        }

        ui.separator();
        if let Some(ms) = self.last_duration {
            ui.label(format!("Frame: {:.2} ms", ms));
        }
        ui.label(&self.status_message);
    }
}

impl App for VoxelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // One frame: input, camera, rasterize, present
        self.scene.update(input::poll(ctx));

        let start = Instant::now();
        self.scene.render_frame(&mut self.frame);
        self.last_duration = Some(start.elapsed().as_secs_f32() * 1000.0);
        self.upload_frame(ctx);

        egui::SidePanel::left("controls")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.texture {
                ui.image((tex.id(), self.canvas));
            }
        });

        if self.frame_interval.is_zero() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.frame_interval);
        }
    }
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

fn main() -> eframe::Result {
    let args = CliArgs::parse();

    let loaded = args.config.as_deref().map(SceneConfig::load);
    let mut config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => SceneConfig::default(),
    };
    args.apply_overrides(&mut config);
    init_logging(&config.log_level);
    if let Some(Err(err)) = &loaded {
        warn!(%err, "using default config");
    }

    let scene = if args.synthetic {
        info!(seed = args.seed, "generating terrain");
        Scene::new(synth::generate(SYNTH_SIZE, args.seed, SYNTH_ROUGHNESS), config)
    } else {
        Scene::load(config)
    };
    if scene.terrain().is_empty() {
        warn!("starting with empty terrain; try --synthetic");
    }

    let canvas = Vec2::new(
        scene.config().screen.canvas_width,
        scene.config().screen.canvas_height,
    );
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas.x + SIDE_PANEL_WIDTH + 24.0, canvas.y + 16.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "voxelspace",
        opts,
        Box::new(move |_cc| Ok(Box::new(VoxelApp::new(scene, args.seed)))),
    )
}
