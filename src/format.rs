//! Color depth and per-depth pixel encoding
use crate::color::{self, DEFAULT_4BIT_PALETTE};

/// Bits per pixel of a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorDepth {
    /// Monochrome bitmap, expanded through the bitmap foreground/background colors
    Bpp1,
    /// 16 color palette indices
    Bpp4,
    /// RGB332
    Bpp8,
    /// RGB565
    #[default]
    Bpp16,
}

impl ColorDepth {
    /// Pick the depth for a bit count, rounding up to the next supported depth.
    pub const fn from_bits(bits: u8) -> Self {
        if bits > 8 {
            ColorDepth::Bpp16
        } else if bits > 4 {
            ColorDepth::Bpp8
        } else if bits > 1 {
            ColorDepth::Bpp4
        } else {
            ColorDepth::Bpp1
        }
    }

    /// Bits used by one pixel.
    pub const fn bits(self) -> u8 {
        match self {
            ColorDepth::Bpp1 => 1,
            ColorDepth::Bpp4 => 4,
            ColorDepth::Bpp8 => 8,
            ColorDepth::Bpp16 => 16,
        }
    }

    /// Row width in pixels once padded so that a row never ends inside a byte.
    pub const fn padded_width(self, width: usize) -> usize {
        match self {
            ColorDepth::Bpp1 => (width + 7) & !7,
            ColorDepth::Bpp4 => (width + 1) & !1,
            _ => width,
        }
    }

    /// Bytes used by one padded row.
    pub const fn row_bytes(self, width: usize) -> usize {
        self.padded_width(width) * self.bits() as usize / 8
    }

    /// Bytes used by one sentinel pixel.
    pub const fn sentinel_bytes(self) -> usize {
        match self {
            ColorDepth::Bpp16 => 2,
            _ => 1,
        }
    }

    /// Bytes used by one frame: every row plus the trailing off-screen pixel.
    pub const fn frame_bytes(self, width: usize, height: usize) -> usize {
        self.row_bytes(width) * height + self.sentinel_bytes()
    }
}

/// Encoding strategy of a sprite, chosen once at creation.
///
/// Raw values are what the store holds for one pixel: the RGB565 color for
/// 16 bpp, the RGB332 byte for 8 bpp, the palette index for 4 bpp and the
/// bit for 1 bpp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Monochrome with the colors a set and a clear bit expand to
    Mono {
        /// color of a set bit
        fg: u16,
        /// color of a clear bit
        bg: u16,
    },
    /// Palette indexed
    Indexed4 {
        /// index to color map
        palette: [u16; 16],
    },
    /// RGB332
    Rgb332,
    /// RGB565
    Rgb565,
}

impl PixelFormat {
    /// Default format for a depth.
    pub const fn for_depth(depth: ColorDepth) -> Self {
        match depth {
            ColorDepth::Bpp1 => PixelFormat::Mono {
                fg: color::WHITE,
                bg: color::BLACK,
            },
            ColorDepth::Bpp4 => PixelFormat::Indexed4 {
                palette: DEFAULT_4BIT_PALETTE,
            },
            ColorDepth::Bpp8 => PixelFormat::Rgb332,
            ColorDepth::Bpp16 => PixelFormat::Rgb565,
        }
    }

    /// Depth of this format.
    pub const fn depth(&self) -> ColorDepth {
        match self {
            PixelFormat::Mono { .. } => ColorDepth::Bpp1,
            PixelFormat::Indexed4 { .. } => ColorDepth::Bpp4,
            PixelFormat::Rgb332 => ColorDepth::Bpp8,
            PixelFormat::Rgb565 => ColorDepth::Bpp16,
        }
    }

    /// Turn a drawing color into the raw value to store.
    ///
    /// 4 bpp drawing colors are palette indices and 1 bpp drawing colors are
    /// "set" when non zero, matching the drawing API of the primitives.
    #[inline]
    pub const fn encode(&self, color: u16) -> u16 {
        match self {
            PixelFormat::Mono { .. } => (color != 0) as u16,
            PixelFormat::Indexed4 { .. } => color & 0x0F,
            PixelFormat::Rgb332 => color::rgb565_to_332(color) as u16,
            PixelFormat::Rgb565 => color,
        }
    }

    /// Expand a raw stored value to RGB565.
    #[inline]
    pub const fn decode(&self, raw: u16) -> u16 {
        match self {
            PixelFormat::Mono { fg, bg } => {
                if raw & 1 != 0 {
                    *fg
                } else {
                    *bg
                }
            }
            PixelFormat::Indexed4 { palette } => palette[(raw & 0x0F) as usize],
            PixelFormat::Rgb332 => color::rgb332_to_565(raw as u8),
            PixelFormat::Rgb565 => raw,
        }
    }

    /// Map a true RGB565 color onto the closest raw value this format can hold.
    ///
    /// Unlike [`PixelFormat::encode`] this treats the input as a color for
    /// every depth, which is what generic renderers hand over.
    pub fn quantize(&self, color: u16) -> u16 {
        match self {
            PixelFormat::Mono { bg, .. } => (color != *bg) as u16,
            PixelFormat::Indexed4 { palette } => nearest_index(palette, color),
            _ => self.encode(color),
        }
    }

    /// True when a stored raw value counts as the transparent `key` color.
    ///
    /// 16 and 8 bpp compare in their own encoding, 4 bpp compares the palette
    /// index `key & 0x0F` and 1 bpp compares the expanded bitmap color.
    #[inline]
    pub fn matches_key(&self, raw: u16, key: u16) -> bool {
        match self {
            PixelFormat::Mono { .. } => self.decode(raw) == key,
            PixelFormat::Indexed4 { .. } => raw == key & 0x0F,
            _ => raw == self.encode(key),
        }
    }
}

fn nearest_index(palette: &[u16; 16], color: u16) -> u16 {
    let (r, g, b) = color::rgb565_to_rgb888(color);
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &entry) in palette.iter().enumerate() {
        if entry == color {
            return i as u16;
        }
        let (er, eg, eb) = color::rgb565_to_rgb888(entry);
        let dr = r as i32 - er as i32;
        let dg = g as i32 - eg as i32;
        let db = b as i32 - eb as i32;
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < best_dist {
            best_dist = dist;
            best = i as u16;
        }
    }
    best
}
