//! Quarter turn rotation of 1 bpp canvases

/// Logical rotation of a canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Rotation for a quarter turn count, taken modulo four
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns & 3 {
            0 => Rotation::Rotate0,
            1 => Rotation::Rotate90,
            2 => Rotation::Rotate180,
            _ => Rotation::Rotate270,
        }
    }

    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// True when width and height trade places
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }

    /// Map a logical point onto the unrotated `width` x `height` storage.
    ///
    /// The caller has already checked the point against the rotated size.
    #[inline]
    pub const fn map(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        match self {
            Rotation::Rotate0 => (x, y),
            Rotation::Rotate90 => (width - 1 - y, x),
            Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
            Rotation::Rotate270 => (y, height - 1 - x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Rotation; 4] = [
        Rotation::Rotate0,
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
    ];

    #[test]
    fn quarter_turns_wrap() {
        assert_eq!(Rotation::from_quarter_turns(5), Rotation::Rotate90);
        assert_eq!(Rotation::from_quarter_turns(3).quarter_turns(), 3);
    }

    #[test]
    fn rotation_stays_inside_storage() {
        let (width, height) = (8, 5);
        for rotation in ALL {
            let (lw, lh) = if rotation.swaps_axes() {
                (height, width)
            } else {
                (width, height)
            };
            let mut hit = [[false; 8]; 5];
            for y in 0..lh {
                for x in 0..lw {
                    let (nx, ny) = rotation.map(x, y, width, height);
                    assert!(nx >= 0 && nx < width, "{rotation:?} {x},{y}");
                    assert!(ny >= 0 && ny < height, "{rotation:?} {x},{y}");
                    assert!(!hit[ny as usize][nx as usize]);
                    hit[ny as usize][nx as usize] = true;
                }
            }
        }
    }

    #[test]
    fn corners_land_where_expected() {
        assert_eq!(Rotation::Rotate90.map(0, 0, 8, 5), (7, 0));
        assert_eq!(Rotation::Rotate180.map(0, 0, 8, 5), (7, 4));
        assert_eq!(Rotation::Rotate270.map(0, 0, 8, 5), (0, 4));
    }
}
