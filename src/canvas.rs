// Canvas module
// RGBA raster surface with anti-aliased circle primitives and alpha blending

use crate::error::RenderError;
use crate::layout::ScreenDimensions;
use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

/// A raster surface backed by an `image::RgbaImage`
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`
    ///
    /// Each side is limited to `ScreenDimensions::MAX_SIDE` pixels.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        let max = ScreenDimensions::MAX_SIDE;
        if width > max || height > max {
            return Err(RenderError::TooLarge { width, height, max });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Blend `color` over the pixel at (x, y) with the given coverage in [0, 1]
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        let alpha = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let blended = color[channel] as f32 * alpha + dst[channel] as f32 * (1.0 - alpha);
            dst[channel] = blended.round() as u8;
        }
        let dst_alpha = dst[3] as f32 / 255.0;
        dst[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Fill a disc centered at (cx, cy)
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        self.shade_around(cx, cy, radius + 1.0, color, |distance| radius - distance + 0.5);
    }

    /// Stroke a circle outline; the line is centered on `radius`
    pub fn stroke_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        line_width: f32,
        color: Rgba<u8>,
    ) {
        let half = line_width / 2.0;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        self.shade_around(cx, cy, outer + 1.0, color, |distance| {
            let outside = (outer - distance + 0.5).clamp(0.0, 1.0);
            let inside = (distance - inner + 0.5).clamp(0.0, 1.0);
            outside * inside
        });
    }

    /// Visit pixels within `extent` of the center and blend by distance-derived coverage
    fn shade_around<F>(&mut self, cx: f32, cy: f32, extent: f32, color: Rgba<u8>, coverage: F)
    where
        F: Fn(f32) -> f32,
    {
        let min_x = (cx - extent).floor() as i32;
        let max_x = (cx + extent).ceil() as i32;
        let min_y = (cy - extent).floor() as i32;
        let max_y = (cy + extent).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let c = coverage((dx * dx + dy * dy).sqrt());
                if c > 0.0 {
                    self.blend_pixel(x, y, color, c);
                }
            }
        }
    }

    /// Encode the canvas as PNG at `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        debug!("Encoding {}x{} canvas to {}", self.width(), self.height(), path.display());
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RenderError::Save {
                path: path.to_path_buf(),
                source,
            })
    }
}
