//! RGB565 color helpers
//!
//! Colors are passed around as native-order RGB565 `u16` values. The
//! sprite store keeps 16 bpp pixels in display bus order (high byte first),
//! 8 bpp pixels as RGB332 and 4 bpp pixels as palette indices.

/// Black
pub const BLACK: u16 = 0x0000;
/// Navy (0, 0, 128)
pub const NAVY: u16 = 0x000F;
/// Dark green (0, 128, 0)
pub const DARKGREEN: u16 = 0x03E0;
/// Maroon (128, 0, 0)
pub const MAROON: u16 = 0x7800;
/// Purple (128, 0, 128)
pub const PURPLE: u16 = 0x780F;
/// Dark grey (128, 128, 128)
pub const DARKGREY: u16 = 0x7BEF;
/// Blue
pub const BLUE: u16 = 0x001F;
/// Green
pub const GREEN: u16 = 0x07E0;
/// Cyan
pub const CYAN: u16 = 0x07FF;
/// Red
pub const RED: u16 = 0xF800;
/// Magenta
pub const MAGENTA: u16 = 0xF81F;
/// Yellow
pub const YELLOW: u16 = 0xFFE0;
/// White
pub const WHITE: u16 = 0xFFFF;
/// Orange (255, 180, 0)
pub const ORANGE: u16 = 0xFDA0;
/// Pink (255, 192, 203)
pub const PINK: u16 = 0xFE19;
/// Brown (150, 75, 0)
pub const BROWN: u16 = 0x9A60;

/// Palette installed on every new 4 bpp sprite.
///
/// Entries 0-9 follow the resistor color code.
pub const DEFAULT_4BIT_PALETTE: [u16; 16] = [
    BLACK, BROWN, RED, ORANGE, YELLOW, GREEN, BLUE, PURPLE, DARKGREY, WHITE, CYAN, MAGENTA,
    MAROON, DARKGREEN, NAVY, PINK,
];

// 2 bit blue channel spread over 5 bits
const BLUE_332: [u16; 4] = [0, 11, 21, 31];

/// Pack a RGB565 color into RGB332.
#[inline]
pub const fn rgb565_to_332(color: u16) -> u8 {
    ((color & 0xE000) >> 8 | (color & 0x0700) >> 6 | (color & 0x0018) >> 3) as u8
}

/// Expand a RGB332 byte back to RGB565.
#[inline]
pub const fn rgb332_to_565(color: u8) -> u16 {
    let c = color as u16;
    (c & 0xE0) << 8
        | (c & 0xC0) << 5
        | (c & 0x1C) << 6
        | (c & 0x1C) << 3
        | BLUE_332[(c & 0x03) as usize]
}

/// Swap the two bytes of a 16 bit color.
#[inline]
pub const fn swap(color: u16) -> u16 {
    color.rotate_left(8)
}

/// Split a RGB565 color into 8 bit channels.
pub const fn rgb565_to_rgb888(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    (r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
}

/// Pack 8 bit channels into RGB565.
pub const fn rgb888_to_565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_survive_332() {
        for c in [BLACK, RED, GREEN, BLUE, WHITE, YELLOW, CYAN, MAGENTA] {
            assert_eq!(rgb332_to_565(rgb565_to_332(c)), c, "{c:#06x}");
        }
    }

    #[test]
    fn blue_expansion_table() {
        assert_eq!(rgb332_to_565(0x00), 0);
        assert_eq!(rgb332_to_565(0x01), 11);
        assert_eq!(rgb332_to_565(0x02), 21);
        assert_eq!(rgb332_to_565(0x03), 31);
    }

    #[test]
    fn every_332_code_is_stable() {
        for code in 0..=255u8 {
            assert_eq!(rgb565_to_332(rgb332_to_565(code)), code);
        }
    }

    #[test]
    fn swap_is_an_involution() {
        assert_eq!(swap(0x12AB), 0xAB12);
        assert_eq!(swap(swap(0xF81F)), 0xF81F);
    }

    #[test]
    fn rgb888_round_trip_on_565_grid() {
        assert_eq!(rgb888_to_565(255, 255, 255), WHITE);
        assert_eq!(rgb565_to_rgb888(RED), (255, 0, 0));
        assert_eq!(rgb888_to_565(0, 255, 0), GREEN);
    }
}
