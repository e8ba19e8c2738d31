use std::path::Path;

use image::DynamicImage;
use tracing::{error, info};

use crate::error::TerrainError;
use crate::grid::{ColorGrid, HeightGrid, Terrain};

fn open(path: &Path) -> Result<DynamicImage, TerrainError> {
    image::open(path).map_err(|source| TerrainError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

// Elevation comes from the first (red / intensity) channel only
pub fn height_grid_from_image(img: &DynamicImage) -> HeightGrid {
    let rgb = img.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let samples = rgb.pixels().map(|p| p[0]).collect();
    HeightGrid::from_raw(w, h, samples).unwrap_or_default()
}

pub fn color_grid_from_image(img: &DynamicImage) -> ColorGrid {
    let rgb = img.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let samples = rgb.pixels().map(|p| p.0).collect();
    ColorGrid::from_raw(w, h, samples).unwrap_or_default()
}

pub fn load_height_grid(path: impl AsRef<Path>) -> Result<HeightGrid, TerrainError> {
    open(path.as_ref()).map(|img| height_grid_from_image(&img))
}

pub fn load_color_grid(path: impl AsRef<Path>) -> Result<ColorGrid, TerrainError> {
    open(path.as_ref()).map(|img| color_grid_from_image(&img))
}

pub fn load_terrain(
    height_map: impl AsRef<Path>,
    color_map: impl AsRef<Path>,
) -> Result<Terrain, TerrainError> {
    let heights = load_height_grid(height_map)?;
    let colors = load_color_grid(color_map)?;
    Terrain::new(heights, colors)
}

// Logs the failure and falls back to empty terrain
pub fn load_terrain_or_empty(
    height_map: impl AsRef<Path>,
    color_map: impl AsRef<Path>,
) -> Terrain {
    let (height_map, color_map) = (height_map.as_ref(), color_map.as_ref());
    match load_terrain(height_map, color_map) {
        Ok(terrain) => {
            info!(
                height_map = %height_map.display(),
                color_map = %color_map.display(),
                width = terrain.width(),
                height = terrain.height(),
                "loaded terrain"
            );
            terrain
        }
        Err(err) => {
            error!(%err, "could not load terrain, rendering empty scene");
            Terrain::empty()
        }
    }
}
