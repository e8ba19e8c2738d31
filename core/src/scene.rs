use tracing::debug;

use crate::camera::{Camera, Intents};
use crate::config::SceneConfig;
use crate::framebuffer::Framebuffer;
use crate::grid::Terrain;
use crate::loader;
use crate::raster::{DrawTarget, Rasterizer};

#[derive(Debug, Clone)]
pub struct Scene {
    terrain: Terrain,
    camera: Camera,
    rasterizer: Rasterizer,
    config: SceneConfig,
}

impl Scene {
    pub fn new(terrain: Terrain, config: SceneConfig) -> Self {
        let camera = Camera::centered(terrain.width(), terrain.height(), &config.camera);
        let rasterizer =
            Rasterizer::new(config.screen.width as usize, config.screen.height as usize)
                .with_quality(config.render.quality);
        Self {
            terrain,
            camera,
            rasterizer,
            config,
        }
    }

    // Reads the configured map images; a failed load leaves an empty scene
    pub fn load(config: SceneConfig) -> Self {
        let terrain =
            loader::load_terrain_or_empty(&config.assets.height_map, &config.assets.color_map);
        Self::new(terrain, config)
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn set_terrain(&mut self, terrain: Terrain) {
        self.terrain = terrain;
        self.reset_camera();
    }

    pub fn reset_camera(&mut self) {
        self.camera = Camera::centered(
            self.terrain.width(),
            self.terrain.height(),
            &self.config.camera,
        );
        debug!(x = self.camera.x, y = self.camera.y, "camera reset");
    }

    pub fn set_quality(&mut self, quality: u32) {
        self.config.render.quality = quality;
        self.rasterizer.set_quality(quality);
    }

    // Kept in the config too, so saving and camera resets see the new value
    pub fn set_max_dist(&mut self, max_dist: i32) {
        self.config.camera.max_dist = max_dist;
        self.camera.max_dist = max_dist;
    }

    pub fn update(&mut self, intents: Intents) {
        self.camera.update(intents);
    }

    pub fn render<T: DrawTarget + ?Sized>(&mut self, target: &mut T) {
        self.rasterizer.render(&self.terrain, &self.camera, target);
    }

    pub fn render_frame(&mut self, frame: &mut Framebuffer) {
        if frame.width() != self.rasterizer.width() || frame.height() != self.rasterizer.height() {
            self.rasterizer.resize(frame.width(), frame.height());
        }
        frame.clear(self.config.render.sky_color);
        self.render(frame);
    }
}
