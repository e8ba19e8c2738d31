use std::path::Path;

use crate::grid::Rgb;
use crate::raster::{ColumnSpan, DrawTarget};

// Background behind the terrain, the classic raylib sky blue
pub const SKY_BLUE: Rgb = [102, 191, 255];

// RGBA8, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        };
        fb.clear(SKY_BLUE);
        fb
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        let [r, g, b] = color;
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    // Row-major RGBA bytes, ready for a texture upload
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )
    }
}

impl DrawTarget for Framebuffer {
    // Fills rows [top, bottom) of the column, clipped to the buffer
    fn draw_span(&mut self, span: ColumnSpan) {
        if span.column >= self.width {
            return;
        }
        let top = (span.top as i64).max(0) as usize;
        let bottom = (span.bottom as i64).clamp(0, self.height as i64) as usize;
        let [r, g, b] = span.color;
        for y in top..bottom {
            let i = (y * self.width + span.column) * 4;
            self.pixels[i..i + 4].copy_from_slice(&[r, g, b, 255]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = [255, 0, 0];

    #[test]
    fn starts_as_sky() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 4 * 3 * 4);
        assert_eq!(fb.pixel(3, 2), Some(SKY_BLUE));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn span_fills_rows_top_to_bottom() {
        let mut fb = Framebuffer::new(3, 10);
        fb.draw_span(ColumnSpan {
            column: 1,
            top: 2.7,
            bottom: 5.0,
            color: RED,
        });
        let painted: Vec<usize> = (0..10).filter(|&y| fb.pixel(1, y) == Some(RED)).collect();
        assert_eq!(painted, vec![2, 3, 4]);
        assert!((0..10).all(|y| fb.pixel(0, y) == Some(SKY_BLUE)));
    }

    #[test]
    fn span_is_clipped_to_the_buffer() {
        let mut fb = Framebuffer::new(2, 4);
        fb.draw_span(ColumnSpan {
            column: 0,
            top: -1000.0,
            bottom: 4.0,
            color: RED,
        });
        fb.draw_span(ColumnSpan {
            column: 7,
            top: 0.0,
            bottom: 4.0,
            color: RED,
        });
        assert!((0..4).all(|y| fb.pixel(0, y) == Some(RED)));
        assert!((0..4).all(|y| fb.pixel(1, y) == Some(SKY_BLUE)));
    }

    #[test]
    fn clear_repaints_everything() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(RED);
        assert!(fb.pixels().chunks(4).all(|p| p == [255, 0, 0, 255]));
    }
}
