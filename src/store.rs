//! Owned pixel arena of a sprite
//!
//! One allocation holds every frame. Each frame is `row_bytes * height`
//! bytes of pixels followed by one spare "off-screen" pixel, so the cursor
//! window can always be pointed somewhere valid without bounds checks on
//! every streamed write.
//!
//! Accessors take absolute, already clipped coordinates in the unrotated
//! storage layout and return values instead of aliased references.
use alloc::vec::Vec;

use crate::error::Error;
use crate::format::ColorDepth;

/// Maximum number of frames sharing one allocation
pub const MAX_FRAMES: u8 = 2;

/// Byte arena plus the layout needed to address it.
#[derive(Clone, Debug)]
pub struct PixelStore {
    bytes: Vec<u8>,
    depth: ColorDepth,
    /// padded width in pixels
    row_pixels: usize,
    frame_bytes: usize,
    frames: u8,
    active: u8,
}

impl PixelStore {
    /// Allocate a zeroed store. `frames` is clamped to `1..=MAX_FRAMES`.
    pub fn new(depth: ColorDepth, width: usize, height: usize, frames: u8) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize);
        }
        let frames = frames.clamp(1, MAX_FRAMES);
        let frame_bytes = depth.frame_bytes(width, height);
        let len = frame_bytes
            .checked_mul(frames as usize)
            .ok_or(Error::OutOfMemory)?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory)?;
        bytes.resize(len, 0);

        Ok(PixelStore {
            bytes,
            depth,
            row_pixels: depth.padded_width(width),
            frame_bytes,
            frames,
            active: 0,
        })
    }

    /// Depth the store was laid out for
    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Number of frames in the allocation
    pub fn frames(&self) -> u8 {
        self.frames
    }

    /// Zero based index of the frame draws go to
    pub fn active_frame(&self) -> u8 {
        self.active
    }

    /// Select the frame draws go to. Out of range frames select the first.
    pub fn select_frame(&mut self, frame: u8) {
        self.active = if frame < self.frames { frame } else { 0 };
    }

    /// Whole allocation, every frame included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Active frame, sentinel pixel included
    pub fn frame(&self) -> &[u8] {
        let start = self.active as usize * self.frame_bytes;
        &self.bytes[start..start + self.frame_bytes]
    }

    /// Active frame, sentinel pixel included
    pub fn frame_mut(&mut self) -> &mut [u8] {
        let start = self.active as usize * self.frame_bytes;
        &mut self.bytes[start..start + self.frame_bytes]
    }

    /// Linear pixel index of `(x, y)`; `(0, height)` is the sentinel pixel.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.row_pixels
    }

    /// Read the raw value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        let i = self.index(x, y);
        let frame = self.frame();
        match self.depth {
            ColorDepth::Bpp16 => u16::from_be_bytes([frame[2 * i], frame[2 * i + 1]]),
            ColorDepth::Bpp8 => frame[i] as u16,
            ColorDepth::Bpp4 => {
                let b = frame[i >> 1];
                // even x in the high nibble
                if i & 1 == 0 {
                    (b >> 4) as u16
                } else {
                    (b & 0x0F) as u16
                }
            }
            ColorDepth::Bpp1 => ((frame[i >> 3] >> (7 - (i & 7))) & 1) as u16,
        }
    }

    /// Write the raw value at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, raw: u16) {
        let i = self.index(x, y);
        let depth = self.depth;
        let frame = self.frame_mut();
        match depth {
            ColorDepth::Bpp16 => frame[2 * i..2 * i + 2].copy_from_slice(&raw.to_be_bytes()),
            ColorDepth::Bpp8 => frame[i] = raw as u8,
            ColorDepth::Bpp4 => {
                let c = (raw & 0x0F) as u8;
                let b = &mut frame[i >> 1];
                if i & 1 == 0 {
                    *b = (c << 4) | (*b & 0x0F);
                } else {
                    *b = (*b & 0xF0) | c;
                }
            }
            ColorDepth::Bpp1 => {
                let mask = 0x80 >> (i & 7);
                if raw & 1 != 0 {
                    frame[i >> 3] |= mask;
                } else {
                    frame[i >> 3] &= !mask;
                }
            }
        }
    }

    /// 16 bpp pixel in bus order (bytes swapped relative to the color).
    #[inline]
    pub fn get_swapped(&self, x: usize, y: usize) -> u16 {
        let i = 2 * self.index(x, y);
        let frame = self.frame();
        u16::from_le_bytes([frame[i], frame[i + 1]])
    }

    /// Fill `len` pixels of row `y` from `x` with one raw value.
    ///
    /// Whole bytes are filled with block writes, only the partial bytes at
    /// either end of a 4 or 1 bpp span are written pixel by pixel.
    pub fn fill_span(&mut self, x: usize, y: usize, len: usize, raw: u16) {
        if len == 0 {
            return;
        }
        let start = self.index(x, y);
        let depth = self.depth;
        match depth {
            ColorDepth::Bpp16 => {
                let [hi, lo] = raw.to_be_bytes();
                let span = &mut self.frame_mut()[2 * start..2 * (start + len)];
                if hi == lo {
                    span.fill(hi);
                } else {
                    for px in span.chunks_exact_mut(2) {
                        px[0] = hi;
                        px[1] = lo;
                    }
                }
            }
            ColorDepth::Bpp8 => self.frame_mut()[start..start + len].fill(raw as u8),
            ColorDepth::Bpp4 => self.fill_packed(x, y, len, raw, 2),
            ColorDepth::Bpp1 => self.fill_packed(x, y, len, raw, 8),
        }
    }

    fn fill_packed(&mut self, mut x: usize, y: usize, mut len: usize, raw: u16, per_byte: usize) {
        let pattern = if per_byte == 2 {
            let c = (raw & 0x0F) as u8;
            c << 4 | c
        } else if raw & 1 != 0 {
            0xFF
        } else {
            0x00
        };
        while len > 0 && x % per_byte != 0 {
            self.set(x, y, raw);
            x += 1;
            len -= 1;
        }
        let whole = len / per_byte;
        if whole > 0 {
            let first = self.index(x, y) / per_byte;
            self.frame_mut()[first..first + whole].fill(pattern);
            x += whole * per_byte;
            len -= whole * per_byte;
        }
        while len > 0 {
            self.set(x, y, raw);
            x += 1;
            len -= 1;
        }
    }

    /// Copy row `y` onto rows `y + 1 .. y + count` for the span `x .. x + len`.
    ///
    /// Only valid for byte aligned spans, i.e. 8 and 16 bpp.
    pub fn replicate_row(&mut self, x: usize, y: usize, len: usize, count: usize) {
        let bpp = self.depth.bits() as usize / 8;
        let row = self.row_pixels * bpp;
        let src = self.index(x, y) * bpp;
        let frame = self.frame_mut();
        for n in 1..count {
            frame.copy_within(src..src + len * bpp, src + n * row);
        }
    }

    /// Move `len` pixels of one row to another, overlapping ranges allowed.
    ///
    /// Only valid for byte aligned pixels, i.e. 8 and 16 bpp.
    pub fn move_span(&mut self, from: (usize, usize), to: (usize, usize), len: usize) {
        let bpp = self.depth.bits() as usize / 8;
        let src = self.index(from.0, from.1) * bpp;
        let dst = self.index(to.0, to.1) * bpp;
        self.frame_mut().copy_within(src..src + len * bpp, dst);
    }

    /// Copy bytes straight into the active frame at pixel `(x, y)`.
    ///
    /// The caller guarantees `x` is byte aligned for packed depths.
    pub fn write_bytes(&mut self, x: usize, y: usize, bytes: &[u8]) {
        let offset = self.index(x, y) * self.depth.bits() as usize / 8;
        self.frame_mut()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Set every byte of the active frame, sentinel included.
    pub fn fill_frame(&mut self, byte: u8) {
        self.frame_mut().fill(byte);
    }
}
