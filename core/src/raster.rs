// Depth slices are marched near to far; the per-column Y-buffer only lets
// a slice draw where it rises above what is already on screen.
use crate::camera::Camera;
use crate::grid::{Rgb, Terrain};

// Higher is faster and coarser
pub const DEFAULT_QUALITY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    pub column: usize,
    pub top: f32,
    pub bottom: f32,
    pub color: Rgb,
}

pub trait DrawTarget {
    fn draw_span(&mut self, span: ColumnSpan);
}

impl DrawTarget for Vec<ColumnSpan> {
    fn draw_span(&mut self, span: ColumnSpan) {
        self.push(span);
    }
}

// Always at least 1
pub fn slice_step(z: i64, max_dist: i64, quality: u32) -> i64 {
    ((z + 1) * i64::from(quality)) / max_dist.max(1) + 1
}

// Near to far. The last depth may overshoot max_dist and is still drawn.
#[derive(Debug, Clone)]
pub struct SliceDepths {
    z: i64,
    max_dist: i64,
    quality: u32,
}

impl Iterator for SliceDepths {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.z >= self.max_dist {
            return None;
        }
        self.z += slice_step(self.z, self.max_dist, self.quality);
        Some(self.z)
    }
}

pub fn slice_depths(max_dist: i64, quality: u32) -> SliceDepths {
    SliceDepths {
        z: 0,
        max_dist,
        quality,
    }
}

// z >= 1
pub fn project_height(camera: &Camera, elevation: u8, z: i64) -> f32 {
    let rise = i64::from(camera.height) - i64::from(elevation);
    rise as f32 / z as f32 * camera.scale_height as f32 + camera.horizon_pos as f32
}

// Bends distant terrain downwards so the horizon arcs. Empirical, not optics.
pub fn convexity(max_dist: i64, z: i64) -> f32 {
    (((max_dist + z) as f64).abs() / max_dist as f64) as f32
}

#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: usize,
    height: usize,
    quality: u32,
    y_buffer: Vec<f32>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            quality: DEFAULT_QUALITY,
            y_buffer: vec![height as f32; width],
        }
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: u32) {
        self.quality = quality;
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.y_buffer = vec![height as f32; width];
    }

    pub fn y_buffer(&self) -> &[f32] {
        &self.y_buffer
    }

    pub fn render<T: DrawTarget + ?Sized>(
        &mut self,
        terrain: &Terrain,
        camera: &Camera,
        target: &mut T,
    ) {
        self.y_buffer.clear();
        self.y_buffer.resize(self.width, self.height as f32);

        let max_dist = i64::from(camera.max_dist);
        let (cam_x, cam_y) = (i64::from(camera.x), i64::from(camera.y));
        let rows = terrain.height() as i64;

        for z in slice_depths(max_dist, self.quality) {
            // No yaw: the strip spans cam.x +- z on the single row cam.y - z
            let left_x = cam_x - z;
            let right_x = cam_x + z;
            let row = cam_y - z;
            if row < 0 {
                // every farther slice is further off the top edge
                break;
            }
            if row >= rows {
                continue;
            }

            let dx = (right_x - left_x) as f32 / self.width as f32;
            let mut px = left_x as f32;
            let bend = convexity(max_dist, z);

            for (column, y_top) in self.y_buffer.iter_mut().enumerate() {
                if let Some((elevation, color)) = terrain.sample(px as i64, row) {
                    let h = project_height(camera, elevation, z) * bend;
                    if h < *y_top {
                        target.draw_span(ColumnSpan {
                            column,
                            top: h,
                            bottom: *y_top,
                            color,
                        });
                        *y_top = h;
                    }
                }
                px += dx;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::grid::{ColorGrid, HeightGrid};

    const RIDGE: Rgb = [200, 200, 200];
    const VALLEY: Rgb = [0, 90, 0];

    fn camera_at(x: i32, y: i32) -> Camera {
        Camera {
            x,
            y,
            ..Camera::centered(0, 0, &CameraConfig::default())
        }
    }

    #[test]
    fn step_is_positive_and_depth_strictly_increases() {
        for &(max_dist, quality) in &[(700, 10), (1, 10), (50, 0), (700, 1000), (3000, 10)] {
            let mut prev = 0;
            let mut count = 0i64;
            for z in slice_depths(max_dist, quality) {
                assert!(slice_step(prev, max_dist, quality) >= 1);
                assert!(z > prev, "stalled at {} (max {}, q {})", z, max_dist, quality);
                prev = z;
                count += 1;
            }
            assert!(count <= max_dist, "{} slices for max {}", count, max_dist);
            assert!(prev >= max_dist);
        }
    }

    #[test]
    fn first_slice_is_one_cell_ahead() {
        assert_eq!(slice_depths(700, DEFAULT_QUALITY).next(), Some(1));
    }

    #[test]
    fn steps_grow_with_depth() {
        assert_eq!(slice_step(0, 700, 10), 1);
        assert_eq!(slice_step(69, 700, 10), 2);
        assert_eq!(slice_step(699, 700, 10), 11);
    }

    #[test]
    fn zero_quality_marches_every_cell() {
        let depths: Vec<i64> = slice_depths(5, 0).collect();
        assert_eq!(depths, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn non_positive_view_distance_has_no_slices() {
        assert_eq!(slice_depths(0, 10).count(), 0);
        assert_eq!(slice_depths(-5, 10).count(), 0);
    }

    #[test]
    fn flat_terrain_at_eye_level_projects_to_horizon() {
        let mut cam = camera_at(0, 0);
        cam.height = 42;
        for z in [1, 2, 17, 699] {
            assert_eq!(project_height(&cam, 42, z), cam.horizon_pos as f32);
        }
    }

    #[test]
    fn higher_terrain_projects_higher_on_screen() {
        let cam = camera_at(0, 0);
        assert!(project_height(&cam, 200, 10) < project_height(&cam, 50, 10));
    }

    #[test]
    fn convexity_grows_with_depth() {
        assert_eq!(convexity(700, 0), 1.0);
        assert!(convexity(700, 350) > convexity(700, 10));
        assert_eq!(convexity(700, 700), 2.0);
    }

    #[test]
    fn empty_terrain_draws_nothing() {
        let mut r = Rasterizer::new(64, 48);
        let mut spans = Vec::new();
        r.render(&Terrain::empty(), &camera_at(0, 0), &mut spans);
        assert!(spans.is_empty());
        assert!(r.y_buffer().iter().all(|&y| y == 48.0));
    }

    #[test]
    fn spans_in_a_column_stack_upwards() {
        let heights: Vec<u8> = (0..64 * 64).map(|i| ((i * 37) % 251) as u8).collect();
        let terrain = Terrain::new(
            HeightGrid::from_raw(64, 64, heights).unwrap(),
            ColorGrid::uniform(64, 64, VALLEY),
        )
        .unwrap();
        let mut r = Rasterizer::new(80, 60);
        let mut spans = Vec::new();
        r.render(&terrain, &camera_at(32, 63), &mut spans);
        assert!(!spans.is_empty());

        let mut tops = vec![60.0f32; 80];
        for span in &spans {
            assert!(span.top < span.bottom);
            assert_eq!(span.bottom, tops[span.column]);
            tops[span.column] = span.top;
        }
        assert_eq!(tops.as_slice(), r.y_buffer());
    }

    #[test]
    fn near_ridge_hides_everything_behind_it() {
        // Row 8 is one cell ahead of the camera and towers above it
        let size = 9;
        let mut heights = vec![0u8; size * size];
        let mut colors = vec![VALLEY; size * size];
        for x in 0..size {
            heights[8 * size + x] = 255;
            colors[8 * size + x] = RIDGE;
        }
        let terrain = Terrain::new(
            HeightGrid::from_raw(size, size, heights).unwrap(),
            ColorGrid::from_raw(size, size, colors).unwrap(),
        )
        .unwrap();

        let mut r = Rasterizer::new(16, 120);
        let mut spans = Vec::new();
        r.render(&terrain, &camera_at(4, 9), &mut spans);

        assert!(!spans.is_empty());
        assert!(spans.iter().all(|s| s.color == RIDGE));
        assert!(r.y_buffer().iter().all(|&y| y < 0.0));
    }

    #[test]
    fn y_buffer_is_reset_every_frame() {
        let terrain = Terrain::new(
            HeightGrid::uniform(32, 32, 0),
            ColorGrid::uniform(32, 32, VALLEY),
        )
        .unwrap();
        let mut cam = camera_at(16, 31);
        cam.height = 1;
        let mut r = Rasterizer::new(32, 240);
        r.render(&terrain, &cam, &mut Vec::new());
        assert!(r.y_buffer().iter().any(|&y| y < 240.0));

        let mut spans = Vec::new();
        r.render(&Terrain::empty(), &cam, &mut spans);
        assert!(spans.is_empty());
        assert!(r.y_buffer().iter().all(|&y| y == 240.0));
    }

    #[test]
    fn camera_far_outside_the_map_is_harmless() {
        let terrain = Terrain::new(
            HeightGrid::uniform(8, 8, 10),
            ColorGrid::uniform(8, 8, VALLEY),
        )
        .unwrap();
        let mut r = Rasterizer::new(32, 24);
        for (x, y) in [
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
            (i32::MIN, i32::MAX),
            (-5000, 4),
            (4, 100_000),
        ] {
            let mut spans = Vec::new();
            r.render(&terrain, &camera_at(x, y), &mut spans);
            assert!(spans.is_empty(), "drew from ({}, {})", x, y);
        }
    }
}
