//! External pixel buffers copied into a sprite
use log::debug;

use crate::color;
use crate::format::ColorDepth;
use crate::rotation::Rotation;
use crate::sprite::Sprite;

/// Borrowed source pixels for [`Sprite::push_image`].
///
/// Rows are packed: `w` values per row for the 16 and 8 bit encodings,
/// `(w + 1) / 2` bytes for nibbles and `(w + 7) / 8` bytes for bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Image<'a> {
    /// RGB565, in bus order unless the sprite's swap-bytes flag is set
    Rgb565(&'a [u16]),
    /// RGB332 bytes
    Rgb332(&'a [u8]),
    /// Palette indices, two per byte, high nibble first
    Indexed4(&'a [u8]),
    /// Bitmap, eight pixels per byte, MSB first
    Mono(&'a [u8]),
}

impl Image<'_> {
    /// Source values per row
    fn stride(&self, w: usize) -> usize {
        match self {
            Image::Rgb565(_) | Image::Rgb332(_) => w,
            Image::Indexed4(_) => w.div_ceil(2),
            Image::Mono(_) => w.div_ceil(8),
        }
    }

    fn len(&self) -> usize {
        match self {
            Image::Rgb565(data) => data.len(),
            Image::Rgb332(data) | Image::Indexed4(data) | Image::Mono(data) => data.len(),
        }
    }
}

impl Sprite {
    /// Copy a `w` x `h` image to `(x, y)`.
    ///
    /// Only the part inside the viewport is copied. Same-depth images go
    /// row by row where the layout allows it; RGB565 and RGB332 images are
    /// converted for 8 and 16 bpp sprites and RGB565 images are matched to
    /// the palette or bitmap colors of 4 and 1 bpp sprites. Other pairings
    /// and images shorter than `w` x `h` are ignored.
    pub fn push_image(&mut self, x: i32, y: i32, w: i32, h: i32, image: Image<'_>) {
        let Some(depth) = self.color_depth() else {
            return;
        };
        if w < 1 || h < 1 {
            return;
        }
        let stride = image.stride(w as usize);
        if stride.checked_mul(h as usize).map_or(true, |n| image.len() < n) {
            debug!("push_image: {}x{} image with only {} values", w, h, image.len());
            return;
        }
        let Some(c) = self.viewport.clip_rect(x, y, w, h) else {
            return;
        };

        for row in 0..c.h {
            let src_row = (c.dy + row) as usize * stride;
            let ty = c.y + row;
            match (depth, image) {
                (ColorDepth::Bpp16, Image::Rgb565(data)) => {
                    let swap = self.swap_bytes;
                    let Some(store) = self.store.as_mut() else {
                        return;
                    };
                    let src = &data[src_row + c.dx as usize..][..c.w as usize];
                    for (i, &v) in src.iter().enumerate() {
                        let native = if swap { v } else { color::swap(v) };
                        store.set((c.x + i as i32) as usize, ty as usize, native);
                    }
                }
                (ColorDepth::Bpp16, Image::Rgb332(data)) => {
                    let Some(store) = self.store.as_mut() else {
                        return;
                    };
                    let src = &data[src_row + c.dx as usize..][..c.w as usize];
                    for (i, &b) in src.iter().enumerate() {
                        store.set(
                            (c.x + i as i32) as usize,
                            ty as usize,
                            color::rgb332_to_565(b),
                        );
                    }
                }
                (ColorDepth::Bpp8, Image::Rgb565(data)) => {
                    let swap = self.swap_bytes;
                    let Some(store) = self.store.as_mut() else {
                        return;
                    };
                    let src = &data[src_row + c.dx as usize..][..c.w as usize];
                    // runs of one color convert once
                    let mut last = None;
                    let mut code = 0;
                    for (i, &v) in src.iter().enumerate() {
                        if last != Some(v) {
                            let native = if swap { v } else { color::swap(v) };
                            code = color::rgb565_to_332(native) as u16;
                            last = Some(v);
                        }
                        store.set((c.x + i as i32) as usize, ty as usize, code);
                    }
                }
                (ColorDepth::Bpp8, Image::Rgb332(data)) => {
                    let Some(store) = self.store.as_mut() else {
                        return;
                    };
                    let src = &data[src_row + c.dx as usize..][..c.w as usize];
                    store.write_bytes(c.x as usize, ty as usize, src);
                }
                (ColorDepth::Bpp4, Image::Indexed4(data)) => {
                    let src = &data[src_row..src_row + stride];
                    if c.x % 2 == 0 && c.dx % 2 == 0 {
                        let whole = (c.w / 2) as usize;
                        let first = (c.dx / 2) as usize;
                        if let Some(store) = self.store.as_mut() {
                            store.write_bytes(c.x as usize, ty as usize, &src[first..first + whole]);
                        }
                        if c.w % 2 == 1 {
                            let sx = c.dx + c.w - 1;
                            self.put_abs(c.x + c.w - 1, ty, nibble(src, sx as usize));
                        }
                    } else {
                        for i in 0..c.w {
                            self.put_abs(c.x + i, ty, nibble(src, (c.dx + i) as usize));
                        }
                    }
                }
                (ColorDepth::Bpp1, Image::Mono(data)) => {
                    let src = &data[src_row..src_row + stride];
                    let mut done = 0;
                    if self.rotation == Rotation::Rotate0 && c.x % 8 == 0 && c.dx % 8 == 0 {
                        let whole = (c.w / 8) as usize;
                        let first = (c.dx / 8) as usize;
                        if let Some(store) = self.store.as_mut() {
                            store.write_bytes(c.x as usize, ty as usize, &src[first..first + whole]);
                        }
                        done = whole as i32 * 8;
                    }
                    for i in done..c.w {
                        self.put_abs(c.x + i, ty, bit(src, (c.dx + i) as usize));
                    }
                }
                (ColorDepth::Bpp4 | ColorDepth::Bpp1, Image::Rgb565(data)) => {
                    let swap = self.swap_bytes;
                    let src = &data[src_row + c.dx as usize..][..c.w as usize];
                    for (i, &v) in src.iter().enumerate() {
                        let native = if swap { v } else { color::swap(v) };
                        let raw = self.format.quantize(native);
                        self.put_abs(c.x + i as i32, ty, raw);
                    }
                }
                _ => {
                    debug!("push_image: image format not supported at {} bpp", depth.bits());
                    return;
                }
            }
        }
    }
}

#[inline]
fn nibble(row: &[u8], x: usize) -> u16 {
    let b = row[x / 2];
    if x % 2 == 0 {
        (b >> 4) as u16
    } else {
        (b & 0x0F) as u16
    }
}

#[inline]
fn bit(row: &[u8], x: usize) -> u16 {
    ((row[x / 8] >> (7 - x % 8)) & 1) as u16
}
