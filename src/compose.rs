//! Compositing a sprite onto a panel or onto another sprite
//!
//! Pixels leave the sprite as RGB565 in bus order. The destination's
//! swap-bytes flag is cleared for the duration of the transfer and restored
//! afterwards, so its global state is unchanged whatever the outcome.
use alloc::vec::Vec;

use log::debug;

use crate::error::Error;
use crate::format::ColorDepth;
use crate::image::Image;
use crate::rotation::Rotation;
use crate::sprite::Sprite;
use crate::target::{with_transaction, Destination};
use crate::viewport::{Rect, Window};

impl Sprite {
    /// Copy the whole canvas to `(x, y)` of `dest`.
    pub fn push_sprite<D>(&self, dest: &mut D, x: i32, y: i32) -> Result<(), Error>
    where
        D: Destination + ?Sized,
    {
        let (w, h) = self.canvas_size();
        self.composite(dest, x, y, Rect::new(0, 0, w, h), None)
    }

    /// Copy the whole canvas to `(x, y)` of `dest`, leaving the destination
    /// untouched wherever this sprite holds the `transparent` color.
    ///
    /// The key is compared in this sprite's own encoding: the RGB332 code of
    /// the color at 8 bpp, the palette index `transparent & 0x0F` at 4 bpp
    /// and the bitmap color at 1 bpp.
    pub fn push_sprite_transparent<D>(
        &self,
        dest: &mut D,
        x: i32,
        y: i32,
        transparent: u16,
    ) -> Result<(), Error>
    where
        D: Destination + ?Sized,
    {
        let (w, h) = self.canvas_size();
        self.composite(dest, x, y, Rect::new(0, 0, w, h), Some(transparent))
    }

    /// Copy the `sw` x `sh` area at `(sx, sy)` of this canvas to `(tx, ty)`
    /// of `dest`.
    ///
    /// The area is clipped to the canvas like a cursor window; the part cut
    /// off at the left or top moves the target along with it.
    #[allow(clippy::too_many_arguments)]
    pub fn push_sprite_region<D>(
        &self,
        dest: &mut D,
        tx: i32,
        ty: i32,
        sx: i32,
        sy: i32,
        sw: i32,
        sh: i32,
    ) -> Result<(), Error>
    where
        D: Destination + ?Sized,
    {
        if self.store.is_none() {
            return Err(Error::NotCreated);
        }
        if sw < 1 || sh < 1 {
            return Err(Error::OutOfBounds);
        }
        let (cw, ch) = self.canvas_size();
        let window = Window::new(sx, sy, sx + sw - 1, sy + sh - 1, cw, ch);
        if window.is_parked(ch) {
            return Err(Error::OutOfBounds);
        }
        let (xs, ys, xe, ye) = window.bounds();
        let src = Rect::new(xs, ys, xe - xs + 1, ye - ys + 1);
        self.composite(dest, tx + xs - sx, ty + ys - sy, src, None)
    }

    /// Copy this sprite to `(x, y)` of another sprite.
    ///
    /// Supported depth pairs are 16 to 16 or 8, and same depth copies at 8,
    /// 4 and 1 bpp. 4 bpp copies move palette indices as they are.
    pub fn push_to_sprite(&self, dest: &mut Sprite, x: i32, y: i32) -> Result<(), Error> {
        let (src_depth, dest_depth) = self.depth_pair(dest)?;
        match (src_depth, dest_depth) {
            (ColorDepth::Bpp16, ColorDepth::Bpp16 | ColorDepth::Bpp8)
            | (ColorDepth::Bpp8, ColorDepth::Bpp8)
            | (ColorDepth::Bpp4, ColorDepth::Bpp4)
            | (ColorDepth::Bpp1, ColorDepth::Bpp1) => {}
            _ => {
                debug!(
                    "push_to_sprite: {} bpp onto {} bpp not supported",
                    src_depth.bits(),
                    dest_depth.bits()
                );
                return Err(Error::UnsupportedDepth);
            }
        }

        let (w, h) = self.canvas_size();
        with_transaction(dest, false, |dest| {
            match src_depth {
                ColorDepth::Bpp16 => {
                    let mut line = Vec::with_capacity(w as usize);
                    for row in 0..h {
                        line.clear();
                        line.extend((0..w).map(|col| self.bus_color_abs(col, row)));
                        dest.push_image(x, y + row, w, 1, Image::Rgb565(&line));
                    }
                }
                ColorDepth::Bpp1 if self.rotation != Rotation::Rotate0 => {
                    let bits = self.pack_bits(Rect::new(0, 0, w, h));
                    dest.push_image(x, y, w, h, Image::Mono(&bits));
                }
                _ => {
                    let Some(store) = self.store.as_ref() else {
                        return Err(Error::NotCreated);
                    };
                    let frame = store.frame();
                    let image = match src_depth {
                        ColorDepth::Bpp8 => Image::Rgb332(frame),
                        ColorDepth::Bpp4 => Image::Indexed4(frame),
                        _ => Image::Mono(frame),
                    };
                    dest.push_image(x, y, w, h, image);
                }
            }
            Ok(())
        })
    }

    /// Copy this sprite to `(x, y)` of another sprite, skipping pixels that
    /// hold the `transparent` color.
    ///
    /// Supported depth pairs are 16 to 16 or 8, 8 to 8 and 1 to 1. Palette
    /// sprites are rejected on either side.
    pub fn push_to_sprite_transparent(
        &self,
        dest: &mut Sprite,
        x: i32,
        y: i32,
        transparent: u16,
    ) -> Result<(), Error> {
        let (src_depth, dest_depth) = self.depth_pair(dest)?;
        match (src_depth, dest_depth) {
            (ColorDepth::Bpp16, ColorDepth::Bpp16 | ColorDepth::Bpp8)
            | (ColorDepth::Bpp8, ColorDepth::Bpp8)
            | (ColorDepth::Bpp1, ColorDepth::Bpp1) => {}
            _ => {
                debug!(
                    "push_to_sprite_transparent: {} bpp onto {} bpp not supported",
                    src_depth.bits(),
                    dest_depth.bits()
                );
                return Err(Error::UnsupportedDepth);
            }
        }

        let (w, h) = self.canvas_size();
        let src = Rect::new(0, 0, w, h);
        let key = Some(transparent);
        let mut words = Vec::with_capacity(w as usize);
        let mut bytes = Vec::with_capacity(w as usize);
        with_transaction(dest, false, |dest| {
            for row in 0..h {
                self.for_each_opaque_run(src, row, key, |start, len| {
                    let (rx, ry) = (x + start, y + row);
                    let cols = start..start + len;
                    match src_depth {
                        ColorDepth::Bpp16 => {
                            words.clear();
                            words.extend(cols.map(|col| self.bus_color_abs(col, row)));
                            dest.push_image(rx, ry, len, 1, Image::Rgb565(&words));
                        }
                        ColorDepth::Bpp8 => {
                            bytes.clear();
                            bytes.extend(cols.map(|col| self.get_abs(col, row) as u8));
                            dest.push_image(rx, ry, len, 1, Image::Rgb332(&bytes));
                        }
                        _ => {
                            bytes.clear();
                            bytes.extend(self.pack_bits(Rect::new(start, row, len, 1)));
                            dest.push_image(rx, ry, len, 1, Image::Mono(&bytes));
                        }
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn depth_pair(&self, dest: &Sprite) -> Result<(ColorDepth, ColorDepth), Error> {
        match (self.color_depth(), dest.color_depth()) {
            (Some(src), Some(dest)) => Ok((src, dest)),
            _ => Err(Error::NotCreated),
        }
    }

    fn composite<D>(
        &self,
        dest: &mut D,
        x: i32,
        y: i32,
        src: Rect,
        key: Option<u16>,
    ) -> Result<(), Error>
    where
        D: Destination + ?Sized,
    {
        if self.store.is_none() {
            return Err(Error::NotCreated);
        }
        let mut line = Vec::with_capacity(src.w as usize);
        with_transaction(dest, false, |dest| {
            for row in 0..src.h {
                self.for_each_opaque_run(src, row, key, |start, len| {
                    line.clear();
                    line.extend(
                        (start..start + len).map(|col| self.bus_color_abs(src.x + col, src.y + row)),
                    );
                    dest.push_image(x + start, y + row, len, 1, &line, None)?;
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    /// Call `f` with the start column and length of every run in row `row`
    /// of `src` that does not hold the key. Without a key the row is one run.
    fn for_each_opaque_run<F>(
        &self,
        src: Rect,
        row: i32,
        key: Option<u16>,
        mut f: F,
    ) -> Result<(), Error>
    where
        F: FnMut(i32, i32) -> Result<(), Error>,
    {
        let Some(key) = key else {
            return f(0, src.w);
        };
        let y = src.y + row;
        let mut start = None;
        for col in 0..src.w {
            let clear = self.format.matches_key(self.get_abs(src.x + col, y), key);
            match (clear, start) {
                (false, None) => start = Some(col),
                (true, Some(s)) => {
                    f(s, col - s)?;
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            f(s, src.w - s)?;
        }
        Ok(())
    }

    /// Pack the bits of a 1 bpp area row by row, MSB first, each row padded
    /// to whole bytes
    fn pack_bits(&self, area: Rect) -> Vec<u8> {
        let stride = (area.w as usize).div_ceil(8);
        let mut bits = alloc::vec![0u8; stride * area.h as usize];
        for row in 0..area.h {
            for col in 0..area.w {
                if self.get_abs(area.x + col, area.y + row) & 1 != 0 {
                    let i = row as usize * stride + col as usize / 8;
                    bits[i] |= 0x80 >> (col % 8);
                }
            }
        }
        bits
    }
}
