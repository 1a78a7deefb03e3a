use std::sync::Arc;

use fontdue::Font;
use glam::Vec2;

use crate::core::color::Color;

/// Refuse to allocate past 4K; a graph widget has no business being bigger.
pub const MAX_DIMS: (usize, usize) = (3840, 2160);

/// Owned 2D drawing surface: a row-major 0x00RRGGBB pixel buffer plus the
/// immediate-mode primitives the graph renderer needs. The buffer layout is
/// exactly what minifb's `update_with_buffer` wants, so hosts can blit it
/// without conversion.
pub struct Canvas {
    logical: [usize; 2],
    width: usize,
    height: usize,
    data: Vec<u32>,
    font: Option<Arc<Font>>,
    font_px: f32,
}

impl Canvas {
    /// Device pixels are twice the logical size for crispness.
    pub fn new(logical: [usize; 2]) -> Self {
        let (width, height) = (logical[0] * 2, logical[1] * 2);
        assert!(
            width <= MAX_DIMS.0 && height <= MAX_DIMS.1,
            "canvas created beyond maximum dimensions"
        );
        Self {
            logical,
            width,
            height,
            data: vec![0; width * height],
            font: None,
            font_px: 28.0,
        }
    }

    /// Adopt a new logical/pixel size pair. Reallocates the backing buffer
    /// when the pixel size changed; old content is discarded because every
    /// paint is a full redraw anyway.
    pub fn set_size(&mut self, logical: [usize; 2], pixel: [usize; 2]) {
        assert!(
            pixel[0] <= MAX_DIMS.0 && pixel[1] <= MAX_DIMS.1,
            "canvas resized beyond maximum dimensions"
        );
        self.logical = logical;
        if pixel != [self.width, self.height] {
            self.width = pixel[0];
            self.height = pixel[1];
            self.data = vec![0; self.width * self.height];
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn logical_size(&self) -> [usize; 2] {
        self.logical
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub fn set_font(&mut self, font: Font, px: f32) {
        self.font = Some(Arc::new(font));
        self.font_px = px;
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let packed = color.to_u32();
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for row in y..y1 {
            let offset = row * self.width;
            self.data[offset + x..offset + x1].fill(packed);
        }
    }

    /// 1px border just inside the given rectangle.
    pub fn stroke_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = ((x + w - 1) as f32, (y + h - 1) as f32);
        self.draw_line(Vec2::new(x0, y0), Vec2::new(x1, y0), color);
        self.draw_line(Vec2::new(x1, y0), Vec2::new(x1, y1), color);
        self.draw_line(Vec2::new(x1, y1), Vec2::new(x0, y1), color);
        self.draw_line(Vec2::new(x0, y1), Vec2::new(x0, y0), color);
    }

    /// Straight 1px segment. Endpoints may lie anywhere, including far off
    /// the canvas: every produced pixel is clipped individually, which is
    /// what lets out-of-range graph values draw "above" the widget safely.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        let packed = color.to_u32();
        bresenham(start, end, |x, y| self.plot(x, y, packed));
    }

    /// Rasterize `text` with the configured font, anchored near `(x, y)`.
    /// A no-op when no font was supplied (the widget warns about that once
    /// at construction); the graph then simply has no numeric readout.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let font = match &self.font {
            Some(font) => Arc::clone(font),
            None => return,
        };
        let px = self.font_px;
        let mut cursor_x = x;
        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, px);
            for (i, &alpha) in bitmap.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let bx = (i % metrics.width) as i32;
                let by = (i / metrics.width) as i32;
                let a = alpha as f32 / 255.0;
                let shaded = Color::new(color.r * a, color.g * a, color.b * a);
                self.plot(cursor_x + bx + metrics.xmin, y + by + metrics.ymin, shaded.to_u32());
            }
            cursor_x += metrics.advance_width as i32;
        }
    }

    fn plot(&mut self, x: i32, y: i32, packed: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = packed;
        }
    }
}

/// Integer line walk calling `plot` for every point, both endpoints included.
fn bresenham<F: FnMut(i32, i32)>(start: Vec2, end: Vec2, mut plot: F) {
    let mut x0 = start.x as i32;
    let mut y0 = start.y as i32;
    let x1 = end.x as i32;
    let y1 = end.y as i32;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
