//! Drawing primitives
//!
//! Colors are drawing colors: RGB565 at 16 and 8 bpp, a palette index at
//! 4 bpp and "set when non zero" at 1 bpp. Every primitive adds the viewport
//! datum and then clips against the viewport by shrinking the protruding
//! edges.
use crate::format::ColorDepth;
use crate::sprite::Sprite;
use crate::viewport::Rect;

impl Sprite {
    /// Draw a single pixel
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u16) {
        if self.store.is_none() {
            return;
        }
        if let Some((x, y)) = self.viewport.map_point(x, y) {
            let raw = self.format.encode(color);
            self.put_abs(x, y, raw);
        }
    }

    /// Draw `w` pixels to the right of `(x, y)`
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        self.fill_rect(x, y, w, 1, color);
    }

    /// Draw `h` pixels downwards from `(x, y)`
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// Draw a line between two points, both included.
    ///
    /// Consecutive steps along the major axis are gathered into one fast
    /// line each.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, color: u16) {
        if self.store.is_none() || self.viewport.is_out_of_bounds() {
            return;
        }

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx >> 1;
        let mut xs = x0;
        let mut len = 0;

        let run = |sprite: &mut Sprite, major: i32, minor: i32, len: i32| {
            match (steep, len) {
                (true, 1) => sprite.draw_pixel(minor, major, color),
                (true, _) => sprite.draw_fast_vline(minor, major, len, color),
                (false, 1) => sprite.draw_pixel(major, minor, color),
                (false, _) => sprite.draw_fast_hline(major, minor, len, color),
            }
        };

        while x0 <= x1 {
            len += 1;
            err -= dy;
            if err < 0 {
                err += dx;
                run(self, xs, y0, len);
                len = 0;
                y0 += ystep;
                xs = x0 + 1;
            }
            x0 += 1;
        }
        if len > 0 {
            run(self, xs, y0, len);
        }
    }

    /// Outline of a `w` x `h` rectangle
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let right = x.saturating_add(w).saturating_sub(1);
        let bottom = y.saturating_add(h).saturating_sub(1);
        let inner = h.saturating_sub(2);
        self.draw_fast_hline(x, y, w, color);
        self.draw_fast_hline(x, bottom, w, color);
        self.draw_fast_vline(x, y.saturating_add(1), inner, color);
        self.draw_fast_vline(right, y.saturating_add(1), inner, color);
    }

    /// Fill a `w` x `h` rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let raw = self.format.encode(color);
        self.fill_rect_raw(x, y, w, h, raw);
    }

    pub(crate) fn fill_rect_raw(&mut self, x: i32, y: i32, w: i32, h: i32, raw: u16) {
        if self.store.is_none() {
            return;
        }
        if let Some(c) = self.viewport.clip_rect(x, y, w, h) {
            self.fill_abs(c.x, c.y, c.w, c.h, raw);
        }
    }

    /// Fill the viewport, which is the whole canvas unless one was set
    pub fn fill_sprite(&mut self, color: u16) {
        let raw = self.format.encode(color);
        self.fill_sprite_raw(raw);
    }

    pub(crate) fn fill_sprite_raw(&mut self, raw: u16) {
        if self.store.is_none() || self.viewport.is_out_of_bounds() {
            return;
        }
        let clip = self.viewport.clip();
        let (w, h) = self.canvas_size();
        if clip != Rect::new(0, 0, w, h) {
            self.fill_abs(clip.x, clip.y, clip.w, clip.h, raw);
            return;
        }

        let pattern = match self.format.depth() {
            ColorDepth::Bpp16 => {
                let [hi, lo] = raw.to_be_bytes();
                if hi != lo {
                    self.fill_abs(0, 0, w, h, raw);
                    return;
                }
                hi
            }
            ColorDepth::Bpp8 => raw as u8,
            ColorDepth::Bpp4 => {
                let c = (raw & 0x0F) as u8;
                c << 4 | c
            }
            ColorDepth::Bpp1 => {
                if raw & 1 != 0 {
                    0xFF
                } else {
                    0x00
                }
            }
        };
        if let Some(store) = self.store.as_mut() {
            store.fill_frame(pattern);
        }
    }
}
