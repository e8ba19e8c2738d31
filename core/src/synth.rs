use palette::{Gradient, LinSrgb};

use crate::grid::{ColorGrid, HeightGrid, Terrain};

// Contrast boost applied after normalizing
const GAMMA_CORRECTION: f32 = 1.2;

// xorshift64, mapped to [-1, +1]; reproducible for a given seed
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0xCAFEBABE12345678)
    }

    fn next(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32
    }
}

// Round up to the nearest 2^n + 1 the algorithm can subdivide
fn grid_size(size: usize) -> usize {
    (size.max(3) - 1).next_power_of_two() + 1
}

// Diamond-square on a size x size grid, size = 2^n + 1. Row-major output.
fn diamond_square(size: usize, seed: u64, roughness: f32) -> Vec<f32> {
    let mut map = vec![0.0f32; size * size];
    let at = |x: usize, y: usize| y * size + x;
    let mut rng = Rng::new(seed);

    let last = size - 1;
    map[at(0, 0)] = rng.next();
    map[at(last, 0)] = rng.next();
    map[at(0, last)] = rng.next();
    map[at(last, last)] = rng.next();

    let mut step = last;
    let mut offset = 1.0f32;

    while step > 1 {
        let half = step / 2;

        // Diamond: square centers from their four corners
        for y in (0..last).step_by(step) {
            for x in (0..last).step_by(step) {
                let avg = (map[at(x, y)]
                    + map[at(x + step, y)]
                    + map[at(x, y + step)]
                    + map[at(x + step, y + step)])
                    * 0.25;
                map[at(x + half, y + half)] = avg + rng.next() * offset;
            }
        }

        // Square: edge midpoints from whichever neighbors exist
        for y in (0..size).step_by(half) {
            for x in ((y + half) % step..size).step_by(step) {
                let mut sum = 0.0;
                let mut cnt = 0;
                if x >= half {
                    sum += map[at(x - half, y)];
                    cnt += 1;
                }
                if x + half < size {
                    sum += map[at(x + half, y)];
                    cnt += 1;
                }
                if y >= half {
                    sum += map[at(x, y - half)];
                    cnt += 1;
                }
                if y + half < size {
                    sum += map[at(x, y + half)];
                    cnt += 1;
                }
                map[at(x, y)] = sum / cnt as f32 + rng.next() * offset;
            }
        }

        step = half;
        offset *= roughness;
    }
    map
}

// Rescale to [0, 1] with the gamma curve applied
fn normalize(map: &mut [f32]) {
    let (min, max) = map
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = (max - min).max(0.001);
    for v in map.iter_mut() {
        *v = ((*v - min) / range).powf(GAMMA_CORRECTION);
    }
}

fn terrain_gradient() -> Gradient<LinSrgb> {
    Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)), // deep water
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)), // sand
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)), // grass
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)), // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)), // snow
    ])
}

// roughness ~0.5 rolling hills, ~1.0 jagged ridges
pub fn generate(size: usize, seed: u64, roughness: f32) -> Terrain {
    let size = grid_size(size);
    let mut map = diamond_square(size, seed, roughness);
    normalize(&mut map);

    let gradient = terrain_gradient();
    let heights = map.iter().map(|&h| (h * 255.0).round() as u8).collect();
    let colors = map
        .iter()
        .map(|&h| {
            let rgb = gradient.get(h).into_format::<u8>();
            [rgb.red, rgb.green, rgb.blue]
        })
        .collect();

    // Both grids come from the same map, so sizes always agree
    Terrain::new(
        HeightGrid::from_raw(size, size, heights).unwrap_or_default(),
        ColorGrid::from_raw(size, size, colors).unwrap_or_default(),
    )
    .unwrap_or_default()
}
