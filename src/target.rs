//! Destinations a sprite can be composited onto
//!
//! A destination takes the same windowed pixel stream a TFT controller does:
//! set a rectangular window, then push pixels into it row by row. 16 bit
//! values handed to a destination are in bus order (bytes swapped) while its
//! swap-bytes flag is cleared, and native RGB565 while it is set.
use display_interface::DisplayError;

use crate::error::Error;
use crate::viewport::Rect;

/// Pixel sink for composited sprites: a panel or another sprite.
pub trait Destination {
    /// Drawable area in destination coordinates
    fn bounds(&self) -> Rect;

    /// Point a rotated sprite's pivot is placed on
    fn pivot(&self) -> (i32, i32);

    /// True when pushed 16 bit values are native RGB565
    fn swap_bytes(&self) -> bool;

    /// Choose how pushed 16 bit values are interpreted
    fn set_swap_bytes(&mut self, swap: bool);

    /// Open a write transaction
    fn start_write(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Close a write transaction
    fn end_write(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Address the inclusive rectangle `(x0, y0)`-`(x1, y1)` for the next pixels
    fn set_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Stream pixels into the current window
    fn push_pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError>;

    /// Write a `w` x `h` block of pixels at `(x, y)`, leaving pixels equal to
    /// `transparent` untouched.
    ///
    /// The block is clipped to [`Destination::bounds`]. Runs of opaque pixels
    /// are sent as one window each.
    fn push_image(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        data: &[u16],
        transparent: Option<u16>,
    ) -> Result<(), DisplayError> {
        if !holds_block(data.len(), w, h) {
            return Ok(());
        }
        let b = self.bounds();
        let x0 = x.max(b.x);
        let y0 = y.max(b.y);
        let x1 = x.saturating_add(w).min(b.right());
        let y1 = y.saturating_add(h).min(b.bottom());
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        for yy in y0..y1 {
            let start = (yy - y) as usize * w as usize + (x0 - x) as usize;
            let row = &data[start..start + (x1 - x0) as usize];
            for_each_run(row, transparent, |offset, run| {
                let rx = x0 + offset as i32;
                self.set_window(rx, yy, rx + run.len() as i32 - 1, yy)?;
                self.push_pixels(run)
            })?;
        }
        Ok(())
    }
}

/// True when `len` values cover a `w` x `h` block with both sides positive
pub(crate) fn holds_block(len: usize, w: i32, h: i32) -> bool {
    w >= 1
        && h >= 1
        && (w as usize)
            .checked_mul(h as usize)
            .is_some_and(|n| n <= len)
}

/// Call `f` with the offset and pixels of every run in `row` that does not
/// match `key`. Without a key the whole row is one run.
pub fn for_each_run<E, F>(row: &[u16], key: Option<u16>, mut f: F) -> Result<(), E>
where
    F: FnMut(usize, &[u16]) -> Result<(), E>,
{
    let Some(key) = key else {
        return if row.is_empty() { Ok(()) } else { f(0, row) };
    };

    let mut start = None;
    for (i, &px) in row.iter().enumerate() {
        match (px == key, start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                f(s, &row[s..i])?;
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        f(s, &row[s..])?;
    }
    Ok(())
}

/// Run `f` inside a write transaction with the destination's swap-bytes flag
/// set to `swap`.
///
/// The transaction is closed and the previous flag restored whether `f`
/// succeeds or not.
pub(crate) fn with_transaction<D, T>(
    dest: &mut D,
    swap: bool,
    f: impl FnOnce(&mut D) -> Result<T, Error>,
) -> Result<T, Error>
where
    D: Destination + ?Sized,
{
    let old_swap = dest.swap_bytes();
    dest.set_swap_bytes(swap);
    if let Err(err) = dest.start_write() {
        dest.set_swap_bytes(old_swap);
        return Err(err.into());
    }

    let result = f(dest);
    let ended = dest.end_write();
    dest.set_swap_bytes(old_swap);

    let value = result?;
    ended?;
    Ok(value)
}
