// core holds the Voxel Space renderer: terrain grids, camera, rasterizer
pub mod camera;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod grid;
pub mod loader;
pub mod raster;
pub mod scene;
pub mod synth;

pub use camera::{Camera, CameraConfig, Intents};
pub use config::SceneConfig;
pub use error::{ConfigError, TerrainError};
pub use framebuffer::Framebuffer;
pub use grid::{ColorGrid, HeightGrid, Rgb, Terrain};
pub use raster::{ColumnSpan, DrawTarget, Rasterizer};
pub use scene::Scene;
