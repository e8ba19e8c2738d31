use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::framebuffer::SKY_BLUE;
use crate::grid::Rgb;
use crate::raster::DEFAULT_QUALITY;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub assets: AssetConfig,
    pub screen: ScreenConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    // used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: AssetConfig::default(),
            screen: ScreenConfig::default(),
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub height_map: PathBuf,
    pub color_map: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            height_map: PathBuf::from("./maps/D1.png"),
            color_map: PathBuf::from("./maps/C1W.png"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            canvas_width: 700.0,
            canvas_height: 700.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub quality: u32,
    pub sky_color: Rgb,
    // 0 repaints as fast as possible
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            sky_color: SKY_BLUE,
            target_fps: 60,
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: SceneConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let c = SceneConfig::default();
        assert_eq!((c.screen.width, c.screen.height), (640, 480));
        assert_eq!(c.render.quality, 10);
        assert_eq!(c.camera, CameraConfig::default());
        assert_eq!(c.assets.height_map, PathBuf::from("./maps/D1.png"));
    }

    #[test]
    fn save_then_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scene.ron");
        let mut config = SceneConfig::default();
        config.camera.max_dist = 1200;
        config.render.quality = 4;
        config.assets.color_map = PathBuf::from("maps/C7.png");
        config.save(&path).unwrap();
        assert_eq!(SceneConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SceneConfig = ron::from_str("(camera: (speed: 9))").unwrap();
        assert_eq!(config.camera.speed, 9);
        assert_eq!(config.camera.max_dist, 700);
        assert_eq!(config.screen, ScreenConfig::default());
    }

    #[test]
    fn unreadable_config_reports_why() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        std::fs::write(&path, "(camera: oops").unwrap();
        assert!(matches!(
            SceneConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            SceneConfig::load(&dir.path().join("missing.ron")),
            Err(ConfigError::ReadError(_))
        ));
    }
}
