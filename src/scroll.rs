//! In-place scrolling of a sub-rectangle
//!
//! The scroll rectangle lives in canvas coordinates: it is neither shifted by
//! a viewport datum nor clipped to the viewport.
use crate::format::ColorDepth;
use crate::sprite::Sprite;
use crate::viewport::Rect;

impl Sprite {
    /// Set the area [`Sprite::scroll`] moves and the color uncovered pixels
    /// get. The area is clipped to the canvas; an area off the canvas is
    /// ignored.
    pub fn set_scroll_rect(&mut self, mut x: i32, mut y: i32, mut w: i32, mut h: i32, color: u16) {
        let (cw, ch) = self.canvas_size();
        if self.store.is_none() || x >= cw || y >= ch {
            return;
        }
        if x < 0 {
            w = w.saturating_add(x);
            x = 0;
        }
        if y < 0 {
            h = h.saturating_add(y);
            y = 0;
        }
        w = w.min(cw - x);
        h = h.min(ch - y);
        if w < 1 || h < 1 {
            return;
        }
        self.scroll_rect = Rect::new(x, y, w, h);
        self.scroll_fill = color;
    }

    /// Current scroll rectangle
    pub fn scroll_rect(&self) -> Rect {
        self.scroll_rect
    }

    /// Move the scroll rectangle's content by `dx` right and `dy` down.
    ///
    /// Uncovered strips are filled with the scroll color. A shift as large as
    /// the rectangle just fills it.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let Some(depth) = self.color_depth() else {
            return;
        };
        if self.viewport.is_out_of_bounds() {
            return;
        }
        let r = self.scroll_rect;
        let raw = self.format.encode(self.scroll_fill);

        if dx.unsigned_abs() >= r.w as u32 || dy.unsigned_abs() >= r.h as u32 {
            self.fill_abs(r.x, r.y, r.w, r.h, raw);
            return;
        }

        let w = r.w - dx.abs();
        let h = r.h - dy.abs();
        let (fx, tx) = if dx <= 0 { (r.x - dx, r.x) } else { (r.x, r.x + dx) };

        for i in 0..h {
            // moving down copies bottom up so no source row is overwritten early
            let (fy, ty) = if dy <= 0 {
                (r.y - dy + i, r.y + i)
            } else {
                let ty = r.y + r.h - 1 - i;
                (ty - dy, ty)
            };

            match depth {
                ColorDepth::Bpp16 | ColorDepth::Bpp8 => {
                    if let Some(store) = self.store.as_mut() {
                        store.move_span(
                            (fx as usize, fy as usize),
                            (tx as usize, ty as usize),
                            w as usize,
                        );
                    }
                }
                ColorDepth::Bpp4 | ColorDepth::Bpp1 => {
                    if dx > 0 {
                        for xp in (0..w).rev() {
                            let v = self.get_abs(fx + xp, fy);
                            self.put_abs(tx + xp, ty, v);
                        }
                    } else {
                        for xp in 0..w {
                            let v = self.get_abs(fx + xp, fy);
                            self.put_abs(tx + xp, ty, v);
                        }
                    }
                }
            }
        }

        if dx > 0 {
            self.fill_abs(r.x, r.y, dx, r.h, raw);
        }
        if dx < 0 {
            self.fill_abs(r.x + r.w + dx, r.y, -dx, r.h, raw);
        }
        if dy > 0 {
            self.fill_abs(r.x, r.y, r.w, dy, raw);
        }
        if dy < 0 {
            self.fill_abs(r.x, r.y + r.h + dy, r.w, -dy, raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::*;
    use crate::format::ColorDepth;
    use crate::sprite::Sprite;
    use crate::viewport::Rect;

    fn patterned(depth: ColorDepth, w: i32, h: i32) -> Sprite {
        let mut s = Sprite::builder(w, h).color_depth(depth).build().unwrap();
        for y in 0..h {
            for x in 0..w {
                s.put_abs(x, y, pattern(depth, x, y));
            }
        }
        s
    }

    fn pattern(depth: ColorDepth, x: i32, y: i32) -> u16 {
        let v = (x * 37 + y * 11 + 1) as u16;
        match depth {
            ColorDepth::Bpp1 => ((x * 3 + y) % 2) as u16,
            ColorDepth::Bpp4 => v & 0x0F,
            ColorDepth::Bpp8 => v & 0xFF,
            ColorDepth::Bpp16 => v,
        }
    }

    #[test]
    fn scroll_rect_is_clipped_to_canvas() {
        let mut s = Sprite::builder(10, 8).build().unwrap();
        s.set_scroll_rect(-2, 3, 20, 20, RED);
        assert_eq!(s.scroll_rect(), Rect::new(0, 3, 10, 5));
        s.set_scroll_rect(10, 0, 4, 4, BLUE);
        assert_eq!(s.scroll_rect(), Rect::new(0, 3, 10, 5));
    }

    #[test]
    fn scroll_back_restores_inner_region() {
        let shifts = [(1, 0), (-2, 0), (0, 3), (0, -1), (2, 2), (-3, 1), (1, -2), (-1, -1)];
        for depth in [
            ColorDepth::Bpp1,
            ColorDepth::Bpp4,
            ColorDepth::Bpp8,
            ColorDepth::Bpp16,
        ] {
            for (dx, dy) in shifts {
                let (sx, sy, sw, sh) = (2, 1, 10, 8);
                let mut s = patterned(depth, 16, 12);
                s.set_scroll_rect(sx, sy, sw, sh, BLACK);
                s.scroll(dx, dy);
                s.scroll(-dx, -dy);

                for y in 0..12 {
                    for x in 0..16 {
                        let in_rect = (sx..sx + sw).contains(&x) && (sy..sy + sh).contains(&y);
                        let kept = (sx + dx.abs()..sx + sw - dx.abs()).contains(&x)
                            && (sy + dy.abs()..sy + sh - dy.abs()).contains(&y);
                        if !in_rect || kept {
                            assert_eq!(
                                s.get_abs(x, y),
                                pattern(depth, x, y),
                                "{depth:?} ({dx},{dy}) at {x},{y}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn scroll_moves_and_fills() {
        let mut s = patterned(ColorDepth::Bpp16, 6, 4);
        s.set_scroll_rect(0, 0, 6, 4, WHITE);
        s.scroll(2, -1);
        for y in 0..4 {
            for x in 0..6 {
                let expected = if x < 2 || y == 3 {
                    WHITE
                } else {
                    pattern(ColorDepth::Bpp16, x - 2, y + 1)
                };
                assert_eq!(s.read_pixel(x, y), expected, "{x},{y}");
            }
        }
    }

    #[test]
    fn oversized_shift_fills_rect() {
        let mut s = patterned(ColorDepth::Bpp8, 6, 6);
        s.set_scroll_rect(1, 1, 3, 3, RED);
        s.scroll(0, -3);
        for y in 0..6 {
            for x in 0..6 {
                if (1..4).contains(&x) && (1..4).contains(&y) {
                    assert_eq!(s.read_pixel(x, y), RED);
                } else {
                    assert_eq!(s.get_abs(x, y), pattern(ColorDepth::Bpp8, x, y));
                }
            }
        }
    }

    #[test]
    fn blocked_viewport_stops_scrolling() {
        let mut s = patterned(ColorDepth::Bpp16, 6, 6);
        s.set_scroll_rect(0, 0, 6, 6, WHITE);
        s.set_viewport(20, 20, 4, 4, false);
        s.scroll(1, 1);
        s.scroll(i32::MIN, 0);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(s.get_abs(x, y), pattern(ColorDepth::Bpp16, x, y));
            }
        }

        s.reset_viewport();
        s.scroll(i32::MIN, i32::MAX);
        assert_eq!(s.read_pixel(3, 3), WHITE);
    }

    #[test]
    fn scroll_ignores_datum() {
        let mut s = patterned(ColorDepth::Bpp8, 8, 8);
        s.set_viewport(4, 4, 4, 4, true);
        s.set_scroll_rect(0, 0, 4, 4, BLACK);
        s.scroll(1, 0);
        assert_eq!(s.get_abs(1, 0), pattern(ColorDepth::Bpp8, 0, 0));
        assert_eq!(s.get_abs(0, 0), 0);
        assert_eq!(s.get_abs(5, 5), pattern(ColorDepth::Bpp8, 5, 5));
    }
}
