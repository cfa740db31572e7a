//! Rotated blits
//!
//! The sprite is turned about its pivot and drawn with that pivot on the
//! destination's pivot. Every destination pixel inside the rotated bounding
//! box is mapped back into the sprite with fixed point arithmetic: sine and
//! cosine are scaled by 1024 once, then each step along a row is two
//! additions.
use alloc::vec::Vec;

use log::debug;

use crate::color;
use crate::error::Error;
use crate::format::{ColorDepth, PixelFormat};
use crate::image::Image;
use crate::sprite::Sprite;
use crate::target::{with_transaction, Destination};

const FP_SCALE: u32 = 10;
const FP_HALF: i32 = 1 << (FP_SCALE - 1);
const DEG_TO_RAD: f32 = 0.017_453_292_5;

/// Inclusive destination area a rotated sprite can touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotatedBox {
    /// leftmost column
    pub min_x: i32,
    /// top row
    pub min_y: i32,
    /// rightmost column
    pub max_x: i32,
    /// bottom row
    pub max_y: i32,
}

/// Sine and cosine of the inverse rotation, scaled by `1 << FP_SCALE`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Trig {
    sin: i32,
    cos: i32,
}

impl Trig {
    fn new(angle: i16) -> (Self, f32, f32) {
        let rad = -(angle as f32) * DEG_TO_RAD;
        let sin = libm::sinf(rad);
        let cos = libm::cosf(rad);
        let scale = (1 << FP_SCALE) as f32;
        let trig = Trig {
            sin: libm::roundf(sin * scale) as i32,
            cos: libm::roundf(cos * scale) as i32,
        };
        (trig, sin, cos)
    }
}

impl Sprite {
    /// Destination area this sprite covers when rotated by `angle` degrees
    /// onto `dest`, clipped to the destination.
    ///
    /// `None` when the sprite is not created or lands completely outside.
    pub fn rotated_bounds<D>(&self, dest: &D, angle: i16) -> Option<RotatedBox>
    where
        D: Destination + ?Sized,
    {
        if self.store.is_none() {
            return None;
        }
        self.rotated_box(dest, angle).map(|(bounds, _)| bounds)
    }

    /// Draw this sprite rotated by `angle` degrees clockwise onto a panel.
    ///
    /// Pixels holding the `transparent` color are skipped; 4 bpp sprites
    /// look the key up as a palette index. Fails with
    /// [`Error::OutOfBounds`] when nothing lands on the destination.
    pub fn push_rotated<D>(
        &self,
        dest: &mut D,
        angle: i16,
        transparent: Option<u16>,
    ) -> Result<(), Error>
    where
        D: Destination + ?Sized,
    {
        if self.store.is_none() {
            return Err(Error::NotCreated);
        }
        let Some((bounds, trig)) = self.rotated_box(dest, angle) else {
            debug!("push_rotated: {} degrees lands outside the destination", angle);
            return Err(Error::OutOfBounds);
        };

        let key = transparent.map(|k| match &self.format {
            PixelFormat::Indexed4 { palette } => color::swap(palette[(k & 0x0F) as usize]),
            _ => color::swap(k),
        });
        let pivot = dest.pivot();

        with_transaction(dest, false, |dest| {
            self.rotated_scan(bounds, trig, pivot, key, |x, y, run| {
                dest.set_window(x, y, x + run.len() as i32 - 1, y)?;
                dest.push_pixels(run)?;
                Ok(())
            })
        })
    }

    /// Draw this sprite rotated by `angle` degrees clockwise onto another
    /// sprite.
    ///
    /// 4 bpp sprites are rejected on either side. A rotation that lands
    /// outside `dest` draws nothing and still succeeds.
    pub fn push_rotated_to_sprite(
        &self,
        dest: &mut Sprite,
        angle: i16,
        transparent: Option<u16>,
    ) -> Result<(), Error> {
        let (Some(depth), Some(dest_depth)) = (self.color_depth(), dest.color_depth()) else {
            return Err(Error::NotCreated);
        };
        if depth == ColorDepth::Bpp4 || dest_depth == ColorDepth::Bpp4 {
            debug!(
                "push_rotated_to_sprite: {} bpp onto {} bpp not supported",
                depth.bits(),
                dest_depth.bits()
            );
            return Err(Error::UnsupportedDepth);
        }
        let Some((bounds, trig)) = self.rotated_box(&*dest, angle) else {
            return Ok(());
        };

        let key = transparent.map(color::swap);
        let pivot = dest.pivot;
        // the box is in canvas coordinates, push_image adds the datum back
        let (dx, dy) = dest.viewport.datum();

        with_transaction(dest, false, |dest| {
            self.rotated_scan(bounds, trig, pivot, key, |x, y, run| {
                dest.push_image(x - dx, y - dy, run.len() as i32, 1, Image::Rgb565(run));
                Ok(())
            })
        })
    }

    fn rotated_box<D>(&self, dest: &D, angle: i16) -> Option<(RotatedBox, Trig)>
    where
        D: Destination + ?Sized,
    {
        let (trig, sin, cos) = Trig::new(angle);
        let (w, h) = self.canvas_size();
        let (px, py) = self.pivot;

        // corners relative to the pivot
        let left = -px as f32;
        let top = -py as f32;
        let right = (w - px) as f32;
        let bottom = (h - py) as f32;
        let corners = [(left, top), (right, top), (right, bottom), (left, bottom)];

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for (cx, cy) in corners {
            let x = (cx * cos + cy * sin) as i32;
            let y = (cy * cos - cx * sin) as i32;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let (dpx, dpy) = dest.pivot();
        let b = dest.bounds();
        let min_x = (min_x - 2 + dpx).max(b.x);
        let min_y = (min_y - 2 + dpy).max(b.y);
        let max_x = (max_x + 2 + dpx).min(b.right() - 1);
        let max_y = (max_y + 2 + dpy).min(b.bottom() - 1);
        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some((
            RotatedBox {
                min_x,
                min_y,
                max_x,
                max_y,
            },
            trig,
        ))
    }

    /// Walk the box row by row and hand every run of valid, opaque pixels
    /// to `flush` as bus order RGB565 together with its first column and
    /// row.
    fn rotated_scan<F>(
        &self,
        bounds: RotatedBox,
        trig: Trig,
        dest_pivot: (i32, i32),
        key: Option<u16>,
        mut flush: F,
    ) -> Result<(), Error>
    where
        F: FnMut(i32, i32, &[u16]) -> Result<(), Error>,
    {
        let (w, h) = self.canvas_size();
        let xe = w << FP_SCALE;
        let ye = h << FP_SCALE;
        let inside = |xs: i32, ys: i32| xs >= 0 && ys >= 0 && xs < xe && ys < ye;
        let (spx, spy) = self.pivot;
        let mut line = Vec::with_capacity((bounds.max_x - bounds.min_x + 1) as usize);

        let xt = bounds.min_x - dest_pivot.0;
        for y in bounds.min_y..=bounds.max_y {
            let yt = y - dest_pivot.1;
            let mut xs = trig.cos * xt - trig.sin * yt + (spx << FP_SCALE) + FP_HALF;
            let mut ys = trig.sin * xt + trig.cos * yt + (spy << FP_SCALE) + FP_HALF;

            let mut x = bounds.min_x;
            while !inside(xs, ys) && x < bounds.max_x {
                x += 1;
                xs += trig.cos;
                ys += trig.sin;
            }
            if !inside(xs, ys) {
                continue;
            }

            line.clear();
            while x <= bounds.max_x && inside(xs, ys) {
                let px = self.bus_color_abs(xs >> FP_SCALE, ys >> FP_SCALE);
                if key == Some(px) {
                    if !line.is_empty() {
                        flush(x - line.len() as i32, y, &line)?;
                        line.clear();
                    }
                } else {
                    line.push(px);
                }
                x += 1;
                xs += trig.cos;
                ys += trig.sin;
            }
            if !line.is_empty() {
                flush(x - line.len() as i32, y, &line)?;
            }
        }
        Ok(())
    }
}
