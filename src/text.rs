// Text rendering module
// Shapes single-line text with cosmic-text and blends the glyphs onto a canvas

use crate::canvas::Canvas;
use crate::layout::{Align, Point};
use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, Style, SwashCache};
use image::Rgba;
use log::{debug, warn};

const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Smallest size a line is shrunk to when it does not fit
const MIN_FONT_SIZE: f32 = 6.0;

/// Generic font family, resolved against the system font database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
}

impl FontFamily {
    fn as_family(self) -> Family<'static> {
        match self {
            FontFamily::Serif => Family::Serif,
            FontFamily::SansSerif => Family::SansSerif,
        }
    }
}

/// How a run of text should look
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub family: FontFamily,
    pub italic: bool,
    pub color: Rgba<u8>,
    /// Global alpha applied on top of glyph coverage
    pub opacity: f32,
}

/// Owns the font database and glyph cache for one render
pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextPainter {
    /// Load system fonts
    pub fn new() -> Self {
        let font_system = FontSystem::new();
        let faces = font_system.db().len();
        if faces == 0 {
            warn!("No system fonts found, text will not be drawn");
        } else {
            debug!("Loaded {} font faces", faces);
        }
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, text: &str, style: &TextStyle) -> Buffer {
        let metrics = Metrics::new(style.size, style.size * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        let attrs = Attrs::new()
            .family(style.family.as_family())
            .style(if style.italic { Style::Italic } else { Style::Normal });
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Draw one line of text with its baseline at `anchor.y`
    ///
    /// Lines wider than `max_width` are drawn at a proportionally smaller size.
    pub fn draw_line(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        anchor: Point,
        align: Align,
        style: &TextStyle,
        max_width: f32,
    ) {
        if text.is_empty() {
            return;
        }

        let mut style = *style;
        let mut buffer = self.shape(text, &style);
        let mut width = line_width(&buffer);
        if width > max_width && max_width > 0.0 {
            let size = (style.size * max_width / width).max(MIN_FONT_SIZE);
            debug!("Shrinking '{}' from {:.1}px to {:.1}px to fit", text, style.size, size);
            style.size = size;
            buffer = self.shape(text, &style);
            width = line_width(&buffer);
        }

        let baseline = buffer
            .layout_runs()
            .next()
            .map(|run| run.line_y)
            .unwrap_or(style.size);
        let left = match align {
            Align::Center => anchor.x - width / 2.0,
            Align::Right => anchor.x - width,
        };
        let origin_x = left.round() as i32;
        let origin_y = (anchor.y - baseline).round() as i32;

        let [r, g, b, _] = style.color.0;
        let opacity = style.opacity;
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgba(r, g, b, 255),
            |x, y, w, h, color| {
                let coverage = color.a() as f32 / 255.0 * opacity;
                let paint = Rgba([color.r(), color.g(), color.b(), 255]);
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        canvas.blend_pixel(origin_x + x + dx, origin_y + y + dy, paint, coverage);
                    }
                }
            },
        );
    }
}

fn line_width(buffer: &Buffer) -> f32 {
    buffer.layout_runs().map(|run| run.line_w).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_draws_nothing() {
        let bg = Rgba([1, 2, 3, 255]);
        let mut canvas = Canvas::new(32, 32, bg).unwrap();
        let mut painter = TextPainter::new();
        let style = TextStyle {
            size: 14.0,
            family: FontFamily::SansSerif,
            italic: false,
            color: Rgba([255, 255, 255, 255]),
            opacity: 1.0,
        };
        painter.draw_line(&mut canvas, "", Point { x: 16.0, y: 16.0 }, Align::Center, &style, 32.0);
        assert_eq!(line_width(&painter.shape("", &style)), 0.0);
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(canvas.pixel(x, y), bg);
            }
        }
    }
}
