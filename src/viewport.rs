//! Clipping viewport and streamed-write cursor window

/// Axis aligned rectangle with its top left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    /// left edge
    pub x: i32,
    /// top edge
    pub y: i32,
    /// width in pixels
    pub w: i32,
    /// height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// First column right of the rectangle
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// First row below the rectangle
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// True when the rectangle holds no pixels
    pub const fn is_empty(&self) -> bool {
        self.w < 1 || self.h < 1
    }

    /// True when `(x, y)` is inside
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }
}

/// A destination rectangle after clipping, with the offset of the part
/// that survived inside the requested source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clipped {
    /// absolute destination column
    pub x: i32,
    /// absolute destination row
    pub y: i32,
    /// columns skipped at the left of the source
    pub dx: i32,
    /// rows skipped at the top of the source
    pub dy: i32,
    /// surviving width
    pub w: i32,
    /// surviving height
    pub h: i32,
}

/// Clipping rectangle plus coordinate datum of a canvas.
///
/// `clip` is always inside the canvas. When the requested area misses the
/// canvas completely the viewport is flagged out of bounds and every
/// drawing call must do nothing until it is reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Viewport {
    clip: Rect,
    x_datum: i32,
    y_datum: i32,
    x_width: i32,
    y_height: i32,
    datum: bool,
    out_of_bounds: bool,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` canvas.
    pub const fn full(width: i32, height: i32) -> Self {
        Viewport {
            clip: Rect::new(0, 0, width, height),
            x_datum: 0,
            y_datum: 0,
            x_width: width,
            y_height: height,
            datum: false,
            out_of_bounds: false,
        }
    }

    /// Restrict drawing to `(x, y, w, h)` of a `width` x `height` canvas.
    ///
    /// With `datum` set, logical coordinates become relative to `(x, y)`.
    pub fn new(x: i32, y: i32, w: i32, h: i32, datum: bool, width: i32, height: i32) -> Self {
        let mut vp = Viewport {
            clip: Rect::default(),
            x_datum: x,
            y_datum: y,
            x_width: w,
            y_height: h,
            datum,
            out_of_bounds: false,
        };

        let (mut cx, mut cy, mut cw, mut ch) = (x, y, w, h);
        if cx < 0 {
            cw = cw.saturating_add(cx);
            cx = 0;
        }
        if cy < 0 {
            ch = ch.saturating_add(cy);
            cy = 0;
        }
        if cx.saturating_add(cw) > width {
            cw = width - cx;
        }
        if cy.saturating_add(ch) > height {
            ch = height - cy;
        }

        if cw < 1 || ch < 1 {
            let mut vp = Viewport::full(width, height);
            vp.out_of_bounds = true;
            return vp;
        }

        if !datum {
            vp.x_datum = 0;
            vp.y_datum = 0;
            vp.x_width = width;
            vp.y_height = height;
        }
        vp.clip = Rect::new(cx, cy, cw, ch);
        vp
    }

    /// Absolute clipping rectangle
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Offset added to every logical coordinate
    pub const fn datum(&self) -> (i32, i32) {
        (self.x_datum, self.y_datum)
    }

    /// Logical size seen through a datum viewport
    pub const fn datum_size(&self) -> (i32, i32) {
        (self.x_width, self.y_height)
    }

    /// True when coordinates are relative to the viewport origin
    pub const fn uses_datum(&self) -> bool {
        self.datum
    }

    /// True when the requested viewport missed the canvas
    pub const fn is_out_of_bounds(&self) -> bool {
        self.out_of_bounds
    }

    /// Logical point to absolute point, or `None` when clipped away.
    #[inline]
    pub fn map_point(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if self.out_of_bounds {
            return None;
        }
        let (x, y) = (x.checked_add(self.x_datum)?, y.checked_add(self.y_datum)?);
        self.clip.contains(x, y).then_some((x, y))
    }

    /// Clip a logical rectangle, shrinking whichever edges stick out.
    pub fn clip_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Option<Clipped> {
        if self.out_of_bounds || w < 1 || h < 1 {
            return None;
        }
        // wide enough for any i32 rectangle plus datum
        let x = i64::from(x) + i64::from(self.x_datum);
        let y = i64::from(y) + i64::from(self.y_datum);
        let x0 = x.max(i64::from(self.clip.x));
        let y0 = y.max(i64::from(self.clip.y));
        let x1 = (x + i64::from(w)).min(i64::from(self.clip.right()));
        let y1 = (y + i64::from(h)).min(i64::from(self.clip.bottom()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Clipped {
            x: x0 as i32,
            y: y0 as i32,
            dx: (x0 - x) as i32,
            dy: (y0 - y) as i32,
            w: (x1 - x0) as i32,
            h: (y1 - y0) as i32,
        })
    }
}

/// Rectangle streamed pixels are written into, with its write cursor.
///
/// Writes advance left to right, wrap to the next row after `xe` and back
/// to `ys` after `ye`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Window {
    xs: i32,
    ys: i32,
    xe: i32,
    ye: i32,
    xptr: i32,
    yptr: i32,
}

impl Window {
    /// Single pixel window at the origin
    pub const fn new_empty() -> Self {
        Window {
            xs: 0,
            ys: 0,
            xe: 0,
            ye: 0,
            xptr: 0,
            yptr: 0,
        }
    }

    /// Clip `(x0, y0)`-`(x1, y1)` (inclusive, any corner order) to a
    /// `width` x `height` canvas.
    ///
    /// A window that misses the canvas is parked on the off-screen pixel at
    /// `(0, height)`.
    pub fn new(mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, width: i32, height: i32) -> Self {
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
        }
        if y0 > y1 {
            core::mem::swap(&mut y0, &mut y1);
        }

        let (xs, ys, xe, ye) = if x0 >= width || x1 < 0 || y0 >= height || y1 < 0 {
            (0, height, 0, height)
        } else {
            (x0.max(0), y0.max(0), x1.min(width - 1), y1.min(height - 1))
        };

        Window {
            xs,
            ys,
            xe,
            ye,
            xptr: xs,
            yptr: ys,
        }
    }

    /// Inclusive bounds `(xs, ys, xe, ye)`
    pub const fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.xs, self.ys, self.xe, self.ye)
    }

    /// Pixel the next write goes to
    pub const fn cursor(&self) -> (i32, i32) {
        (self.xptr, self.yptr)
    }

    /// True when parked on the off-screen pixel of a canvas of `height` rows
    pub const fn is_parked(&self, height: i32) -> bool {
        self.ys >= height
    }

    /// Move the cursor to the next pixel.
    #[inline]
    pub fn advance(&mut self) {
        self.xptr += 1;
        if self.xptr > self.xe {
            self.xptr = self.xs;
            self.yptr += 1;
            if self.yptr > self.ye {
                self.yptr = self.ys;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_clipped_to_canvas() {
        let vp = Viewport::new(-4, 10, 10, 20, false, 16, 16);
        assert_eq!(vp.clip(), Rect::new(0, 10, 6, 6));
        assert!(!vp.is_out_of_bounds());
        assert_eq!(vp.datum(), (0, 0));
    }

    #[test]
    fn viewport_outside_canvas_is_flagged() {
        let vp = Viewport::new(20, 0, 4, 4, true, 16, 16);
        assert!(vp.is_out_of_bounds());
        assert_eq!(vp.map_point(0, 0), None);
        assert_eq!(vp.clip_rect(0, 0, 16, 16), None);
    }

    #[test]
    fn datum_shifts_logical_coordinates() {
        let vp = Viewport::new(4, 4, 8, 8, true, 16, 16);
        assert_eq!(vp.map_point(0, 0), Some((4, 4)));
        assert_eq!(vp.map_point(8, 0), None);
        assert_eq!(vp.datum_size(), (8, 8));
    }

    #[test]
    fn clip_rect_shrinks_protruding_edges() {
        let vp = Viewport::new(4, 4, 8, 8, false, 16, 16);
        let c = vp.clip_rect(0, 2, 16, 4).unwrap();
        assert_eq!(
            c,
            Clipped {
                x: 4,
                y: 4,
                dx: 4,
                dy: 2,
                w: 8,
                h: 2
            }
        );
        assert_eq!(vp.clip_rect(12, 0, 4, 4), None);
        assert_eq!(vp.clip_rect(0, 0, 4, 4), None);
    }

    #[test]
    fn huge_rectangles_clip_without_overflow() {
        let vp = Viewport::new(2, 2, 4, 4, true, 16, 16);
        let c = vp.clip_rect(1, 0, i32::MAX, 1).unwrap();
        assert_eq!((c.x, c.y, c.dx, c.w, c.h), (3, 2, 0, 3, 1));
        let c = vp.clip_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(c, None);
        let c = vp.clip_rect(-1_000_000, 1, i32::MAX, 2).unwrap();
        assert_eq!((c.x, c.dx, c.w), (2, 1_000_000, 4));
        assert_eq!(vp.map_point(i32::MAX, 0), None);
        assert_eq!(vp.map_point(i32::MIN, i32::MIN), None);

        let vp = Viewport::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX, false, 16, 16);
        assert!(vp.is_out_of_bounds());
        let vp = Viewport::new(8, 8, i32::MAX, i32::MAX, false, 16, 16);
        assert_eq!(vp.clip(), Rect::new(8, 8, 8, 8));
    }

    #[test]
    fn window_is_clipped_and_ordered() {
        let w = Window::new(10, 12, -3, 2, 8, 8);
        assert_eq!(w.bounds(), (0, 2, 7, 7));
        assert_eq!(w.cursor(), (0, 2));
    }

    #[test]
    fn window_outside_parks_on_sentinel() {
        let w = Window::new(9, 0, 12, 3, 8, 6);
        assert_eq!(w.bounds(), (0, 6, 0, 6));
        assert!(w.is_parked(6));
    }

    #[test]
    fn cursor_wraps_row_major_and_returns_to_start() {
        let mut w = Window::new(2, 1, 4, 2, 8, 8);
        let mut visited = [[0u8; 8]; 8];
        for _ in 0..6 {
            let (x, y) = w.cursor();
            visited[y as usize][x as usize] += 1;
            w.advance();
        }
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..=4).contains(&x) && (1..=2).contains(&y);
                assert_eq!(visited[y][x], inside as u8);
            }
        }
        assert_eq!(w.cursor(), (2, 1));
    }
}
