//! In-memory RGB raster.

use std::ops::Range;

use super::{Glyph, Image, Rgb, Surface};
use crate::entities::{Field, Rect};

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width * height],
        }
    }

    pub fn for_field(field: &Field) -> Self {
        Self::new(field.width.max(0.0) as usize, field.height.max(0.0) as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn put(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Pixel indices covered by `[start, start + len)`, clipped to `limit`.
    fn span(start: f32, len: f32, limit: usize) -> Range<usize> {
        let lo = start.round().max(0.0) as usize;
        let hi = ((start + len).round().max(0.0) as usize).min(limit);
        lo.min(hi)..hi
    }

    /// Stretch a `src_w × src_h` bitmap over `rect` by nearest-neighbour
    /// sampling; `sample` returns `None` for transparent source pixels.
    fn blit(
        &mut self,
        rect: Rect,
        src_w: usize,
        src_h: usize,
        sample: impl Fn(usize, usize) -> Option<Rgb>,
    ) {
        if src_w == 0 || src_h == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        for py in Self::span(rect.y, rect.height, self.height) {
            let v = ((py as f32 + 0.5 - rect.y) / rect.height * src_h as f32) as usize;
            for px in Self::span(rect.x, rect.width, self.width) {
                let u = ((px as f32 + 0.5 - rect.x) / rect.width * src_w as f32) as usize;
                if let Some(color) = sample(u.min(src_w - 1), v.min(src_h - 1)) {
                    self.put(px, py, color);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn clear_rect(&mut self, rect: Rect) {
        self.fill_rect(rect, Rgb::default());
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let xs = Self::span(rect.x, rect.width, self.width);
        for y in Self::span(rect.y, rect.height, self.height) {
            let row = y * self.width;
            self.pixels[row + xs.start..row + xs.end].fill(color);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let xs = Self::span(cx - radius, radius * 2.0, self.width);
        for y in Self::span(cy - radius, radius * 2.0, self.height) {
            let dy = y as f32 + 0.5 - cy;
            for x in xs.clone() {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
        // Sub-pixel circles still mark the pixel under their centre.
        if cx >= 0.0 && cy >= 0.0 {
            self.put(cx as usize, cy as usize, color);
        }
    }

    fn draw_glyph(&mut self, glyph: &Glyph, rect: Rect) {
        let color = glyph.color;
        self.blit(rect, glyph.width(), glyph.height(), |u, v| {
            glyph.is_set(u, v).then_some(color)
        });
    }

    fn draw_scaled_image(&mut self, image: &Image, rect: Rect) {
        self.blit(rect, image.width(), image.height(), |u, v| image.pixel(u, v));
    }
}
