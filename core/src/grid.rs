use crate::error::TerrainError;

pub type Rgb = [u8; 3];

// Row-major index for signed coordinates, None when outside the grid
fn index(width: usize, height: usize, x: i64, y: i64) -> Option<usize> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= width || y >= height {
        return None;
    }
    Some(y * width + x)
}

fn check_len(width: usize, height: usize, actual: usize) -> Result<(), TerrainError> {
    let expected = width * height;
    if expected != actual {
        return Err(TerrainError::SampleCount {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

// Elevation samples, row-major, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl HeightGrid {
    pub fn from_raw(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, TerrainError> {
        check_len(width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    // Same elevation everywhere, handy for flat test terrain
    pub fn uniform(width: usize, height: usize, elevation: u8) -> Self {
        Self {
            width,
            height,
            samples: vec![elevation; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    // Elevation at (x, y); None outside the grid
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        index(self.width, self.height, x, y).map(|i| self.samples[i])
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

// Surface colors, index-aligned with a HeightGrid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    samples: Vec<Rgb>,
}

impl ColorGrid {
    pub fn from_raw(width: usize, height: usize, samples: Vec<Rgb>) -> Result<Self, TerrainError> {
        check_len(width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn uniform(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            samples: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        index(self.width, self.height, x, y).map(|i| self.samples[i])
    }
}

// Both grids always share dimensions; `new` checks it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Terrain {
    heights: HeightGrid,
    colors: ColorGrid,
}

impl Terrain {
    pub fn new(heights: HeightGrid, colors: ColorGrid) -> Result<Self, TerrainError> {
        if heights.dimensions() != colors.dimensions() {
            return Err(TerrainError::DimensionMismatch {
                height_map: heights.dimensions(),
                color_map: colors.dimensions(),
            });
        }
        Ok(Self { heights, colors })
    }

    // Every lookup misses, so this renders a blank frame
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.samples.is_empty()
    }

    pub fn width(&self) -> usize {
        self.heights.width
    }

    pub fn height(&self) -> usize {
        self.heights.height
    }

    pub fn heights(&self) -> &HeightGrid {
        &self.heights
    }

    pub fn colors(&self) -> &ColorGrid {
        &self.colors
    }

    // Elevation and color at one cell, both or neither
    pub fn sample(&self, x: i64, y: i64) -> Option<(u8, Rgb)> {
        let i = index(self.heights.width, self.heights.height, x, y)?;
        Some((self.heights.samples[i], self.colors.samples[i]))
    }
}
