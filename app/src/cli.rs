// Values given here override the RON config file

use std::path::PathBuf;

use clap::Parser;
use voxelspace::SceneConfig;

#[derive(Parser, Debug)]
#[command(name = "voxelspace", about = "Voxel Space terrain flyover")]
pub struct CliArgs {
    #[arg(long, help = "Greyscale height map image")]
    pub height_map: Option<PathBuf>,

    #[arg(long, help = "Color map image, same size as the height map")]
    pub color_map: Option<PathBuf>,

    #[arg(long, help = "Internal render width in pixels")]
    pub width: Option<u32>,

    #[arg(long, help = "Internal render height in pixels")]
    pub height: Option<u32>,

    #[arg(long, help = "Far clip distance in map cells")]
    pub max_dist: Option<i32>,

    #[arg(long, help = "Slice step growth; lower is finer and slower")]
    pub quality: Option<u32>,

    #[arg(long, help = "Log level (error, warn, info, debug, trace)")]
    pub log_level: Option<String>,

    #[arg(long, help = "Scene config file (RON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Fly over generated terrain instead of loading map images")]
    pub synthetic: bool,

    #[arg(long, default_value_t = 2025, help = "Seed for --synthetic")]
    pub seed: u64,
}

impl CliArgs {
    pub fn apply_overrides(&self, config: &mut SceneConfig) {
        if let Some(ref path) = self.height_map {
            config.assets.height_map = path.clone();
        }
        if let Some(ref path) = self.color_map {
            config.assets.color_map = path.clone();
        }
        if let Some(w) = self.width {
            config.screen.width = w;
        }
        if let Some(h) = self.height {
            config.screen.height = h;
        }
        if let Some(d) = self.max_dist {
            config.camera.max_dist = d;
        }
        if let Some(q) = self.quality {
            config.render.quality = q;
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let args = CliArgs::try_parse_from([
            "voxelspace",
            "--height-map",
            "maps/D7.png",
            "--max-dist",
            "1200",
            "--quality",
            "4",
        ])
        .unwrap();
        let mut config = SceneConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.assets.height_map, PathBuf::from("maps/D7.png"));
        assert_eq!(config.camera.max_dist, 1200);
        assert_eq!(config.render.quality, 4);
        // Non-overridden fields retain defaults
        assert_eq!(config.assets.color_map, PathBuf::from("./maps/C1W.png"));
        assert_eq!(config.screen.width, 640);
        assert!(!args.synthetic);
        assert_eq!(args.seed, 2025);
    }

    #[test]
    fn test_cli_no_override() {
        let args = CliArgs::try_parse_from(["voxelspace"]).unwrap();
        let mut config = SceneConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, SceneConfig::default());
    }
}
