//! Sprite canvas lifecycle, configuration and pixel access
//!
//! A [`Sprite`] starts out uncreated. Every drawing call on an uncreated
//! sprite, or on one whose viewport was set entirely off the canvas, does
//! nothing, and reads return the `0xFFFF` / `0xFF` sentinels.
use display_interface::DisplayError;
use log::{debug, warn};

use crate::color::{self, DEFAULT_4BIT_PALETTE};
use crate::error::Error;
use crate::format::{ColorDepth, PixelFormat};
use crate::image::Image;
use crate::rotation::Rotation;
use crate::store::PixelStore;
use crate::target::{for_each_run, holds_block, Destination};
use crate::viewport::{Rect, Viewport, Window};

/// Color returned by [`Sprite::read_pixel`] when nothing can be read
pub const NO_COLOR: u16 = 0xFFFF;

/// Value returned by [`Sprite::read_pixel_value`] when nothing can be read
pub const NO_VALUE: u16 = 0xFF;

/// In-RAM canvas with its own addressing, independent of any panel.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub(crate) store: Option<PixelStore>,
    pub(crate) format: PixelFormat,
    /// size as created, before rotation
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) rotation: Rotation,
    pub(crate) viewport: Viewport,
    pub(crate) window: Window,
    pub(crate) scroll_rect: Rect,
    pub(crate) scroll_fill: u16,
    pub(crate) pivot: (i32, i32),
    pub(crate) swap_bytes: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Sprite::new(ColorDepth::default())
    }
}

impl Sprite {
    /// An uncreated sprite that will store pixels at `depth`.
    pub const fn new(depth: ColorDepth) -> Self {
        Sprite {
            store: None,
            format: PixelFormat::for_depth(depth),
            width: 0,
            height: 0,
            rotation: Rotation::Rotate0,
            viewport: Viewport::full(0, 0),
            window: Window::new_empty(),
            scroll_rect: Rect::new(0, 0, 0, 0),
            scroll_fill: color::BLACK,
            pivot: (0, 0),
            swap_bytes: false,
        }
    }

    /// Start configuring a sprite of `width` x `height` pixels
    pub fn builder(width: i32, height: i32) -> SpriteBuilder {
        SpriteBuilder::new(width, height)
    }

    /// Allocate the pixel store.
    ///
    /// `frames` is clamped to one or two and 4 bpp sprites always get one.
    /// Creating a sprite that already exists keeps it as it is. Rotation,
    /// viewport, cursor window, scroll rectangle and pivot are reset.
    pub fn create(&mut self, width: i32, height: i32, frames: u8) -> Result<(), Error> {
        if self.store.is_some() {
            return Ok(());
        }
        if width < 1 || height < 1 {
            debug!("create: invalid size {}x{}", width, height);
            return Err(Error::InvalidSize);
        }

        let depth = self.format.depth();
        let frames = if depth == ColorDepth::Bpp4 { 1 } else { frames };
        let store = PixelStore::new(depth, width as usize, height as usize, frames).map_err(
            |err| {
                warn!("create: {}x{} sprite at {} bpp failed: {}", width, height, depth.bits(), err);
                err
            },
        )?;
        debug!(
            "create: {}x{} sprite, {} bpp, {} frame(s)",
            width,
            height,
            depth.bits(),
            store.frames()
        );

        self.store = Some(store);
        self.width = width;
        self.height = height;
        self.rotation = Rotation::Rotate0;
        self.pivot = (width / 2, height / 2);
        self.reset_geometry();
        Ok(())
    }

    /// Free the pixel store. The 4 bpp palette returns to its default.
    pub fn delete(&mut self) {
        if self.store.take().is_some() {
            debug!("delete: {}x{} sprite", self.width, self.height);
        }
        if let PixelFormat::Indexed4 { palette } = &mut self.format {
            *palette = DEFAULT_4BIT_PALETTE;
        }
        self.width = 0;
        self.height = 0;
        self.rotation = Rotation::Rotate0;
        self.reset_geometry();
    }

    /// Replace this sprite by one of another color depth.
    ///
    /// A created sprite is reallocated at the same size and frame count; its
    /// pixels are discarded.
    pub fn with_color_depth(self, depth: ColorDepth) -> Result<Sprite, Error> {
        if self.format.depth() == depth {
            return Ok(self);
        }
        debug!(
            "with_color_depth: {} bpp -> {} bpp",
            self.format.depth().bits(),
            depth.bits()
        );

        let mut next = Sprite::new(depth);
        next.swap_bytes = self.swap_bytes;
        if let Some(store) = &self.store {
            next.create(self.width, self.height, store.frames())?;
        }
        Ok(next)
    }

    /// True once the pixel store exists
    pub fn is_created(&self) -> bool {
        self.store.is_some()
    }

    /// Depth of a created sprite
    pub fn color_depth(&self) -> Option<ColorDepth> {
        self.store.as_ref().map(PixelStore::depth)
    }

    /// Pixel encoding in use
    pub fn pixel_format(&self) -> &PixelFormat {
        &self.format
    }

    /// Select frame 1 or 2 as the draw target and return its bytes.
    ///
    /// Any other number, or frame 2 of a single frame sprite, selects frame 1.
    pub fn frame_buffer(&mut self, frame: u8) -> Option<&[u8]> {
        let store = self.store.as_mut()?;
        store.select_frame(if frame == 2 { 1 } else { 0 });
        Some(store.frame())
    }

    /// Install a 4 bpp palette. Missing entries are set to black and an empty
    /// map restores the default palette.
    pub fn create_palette(&mut self, colors: &[u16]) {
        if let PixelFormat::Indexed4 { palette } = &mut self.format {
            if colors.is_empty() {
                *palette = DEFAULT_4BIT_PALETTE;
                return;
            }
            *palette = [0; 16];
            for (entry, &c) in palette.iter_mut().zip(colors) {
                *entry = c;
            }
        }
    }

    /// Change one palette entry
    pub fn set_palette_color(&mut self, index: u8, color: u16) {
        if let PixelFormat::Indexed4 { palette } = &mut self.format {
            if let Some(entry) = palette.get_mut(index as usize) {
                *entry = color;
            }
        }
    }

    /// Color of one palette entry, `0` when out of range or not 4 bpp
    pub fn palette_color(&self, index: u8) -> u16 {
        match &self.format {
            PixelFormat::Indexed4 { palette } => palette.get(index as usize).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Colors a set and a clear 1 bpp pixel expand to.
    ///
    /// Equal colors would make the bitmap invisible, so `bg` becomes the
    /// inverse of `fg` in that case.
    pub fn set_bitmap_color(&mut self, fg: u16, bg: u16) {
        let bg = if fg == bg { !fg } else { bg };
        if let PixelFormat::Mono { fg: f, bg: b } = &mut self.format {
            *f = fg;
            *b = bg;
        }
    }

    /// Rotate the coordinate frame of a 1 bpp sprite. Other depths ignore it.
    ///
    /// Viewport, cursor window and scroll rectangle are reset to the rotated
    /// canvas.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if self.format.depth() != ColorDepth::Bpp1 {
            return;
        }
        self.rotation = rotation;
        self.reset_geometry();
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Restrict drawing to `(x, y, w, h)`.
    ///
    /// With `datum` set, drawing coordinates become relative to `(x, y)` and
    /// [`Sprite::width`]/[`Sprite::height`] report the viewport size. A
    /// viewport completely off the canvas blocks all drawing until reset.
    pub fn set_viewport(&mut self, x: i32, y: i32, w: i32, h: i32, datum: bool) {
        if self.store.is_none() {
            return;
        }
        let (cw, ch) = self.canvas_size();
        self.viewport = Viewport::new(x, y, w, h, datum, cw, ch);
    }

    /// Draw to the whole canvas again
    pub fn reset_viewport(&mut self) {
        let (w, h) = self.canvas_size();
        self.viewport = Viewport::full(w, h);
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// True when the viewport missed the canvas
    pub fn is_out_of_bounds(&self) -> bool {
        self.viewport.is_out_of_bounds()
    }

    /// Logical width, `0` before creation
    pub fn width(&self) -> i32 {
        if self.store.is_none() {
            return 0;
        }
        if self.viewport.uses_datum() {
            return self.viewport.datum_size().0;
        }
        self.canvas_size().0
    }

    /// Logical height, `0` before creation
    pub fn height(&self) -> i32 {
        if self.store.is_none() {
            return 0;
        }
        if self.viewport.uses_datum() {
            return self.viewport.datum_size().1;
        }
        self.canvas_size().1
    }

    /// Set the point rotated blits turn around
    pub fn set_pivot(&mut self, x: i32, y: i32) {
        self.pivot = (x, y);
    }

    /// Point rotated blits turn around
    pub fn pivot(&self) -> (i32, i32) {
        self.pivot
    }

    /// When set, 16 bit image data pushed into this sprite is native RGB565,
    /// otherwise it is in bus order.
    pub fn set_swap_bytes(&mut self, swap: bool) {
        self.swap_bytes = swap;
    }

    /// See [`Sprite::set_swap_bytes`]
    pub fn swap_bytes(&self) -> bool {
        self.swap_bytes
    }

    /// RGB565 color of a pixel, or [`NO_COLOR`]
    pub fn read_pixel(&self, x: i32, y: i32) -> u16 {
        if self.store.is_none() {
            return NO_COLOR;
        }
        match self.viewport.map_point(x, y) {
            Some((x, y)) => self.format.decode(self.get_abs(x, y)),
            None => NO_COLOR,
        }
    }

    /// Stored value of a pixel, or [`NO_VALUE`].
    ///
    /// That is the color at 16 bpp, the RGB332 byte at 8 bpp, the palette
    /// index at 4 bpp and the bit at 1 bpp.
    pub fn read_pixel_value(&self, x: i32, y: i32) -> u16 {
        if self.store.is_none() {
            return NO_VALUE;
        }
        match self.viewport.map_point(x, y) {
            Some((x, y)) => self.get_abs(x, y),
            None => NO_VALUE,
        }
    }

    /// Point streamed writes at the inclusive rectangle `(x0, y0)`-`(x1, y1)`.
    ///
    /// The window is clipped to the canvas, not the viewport. A window off
    /// the canvas sends every write to the spare pixel past the last row.
    pub fn set_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (w, h) = self.canvas_size();
        self.window = Window::new(x0, y0, x1, y1, w, h);
    }

    /// Write one color at the cursor and advance it
    pub fn push_color(&mut self, color: u16) {
        let raw = self.format.encode(color);
        self.write_color(raw);
    }

    /// Write `count` pixels of one color from the cursor on
    pub fn push_color_n(&mut self, color: u16, count: usize) {
        let raw = self.format.encode(color);
        for _ in 0..count {
            self.write_color(raw);
        }
    }

    /// Write an already encoded value at the cursor and advance it
    pub fn write_color(&mut self, raw: u16) {
        if self.store.is_none() {
            return;
        }
        let (x, y) = self.window.cursor();
        let (_, h) = self.canvas_size();
        if self.window.is_parked(h) {
            let sentinel_row = self.height as usize;
            if let Some(store) = self.store.as_mut() {
                store.set(0, sentinel_row, raw);
            }
        } else {
            self.put_abs(x, y, raw);
        }
        self.window.advance();
    }

    /// Size of the canvas after rotation, ignoring any viewport datum
    pub(crate) fn canvas_size(&self) -> (i32, i32) {
        if self.store.is_none() {
            (0, 0)
        } else if self.rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    fn reset_geometry(&mut self) {
        let (w, h) = self.canvas_size();
        self.viewport = Viewport::full(w, h);
        self.window = Window::new(0, 0, w - 1, h - 1, w, h);
        self.scroll_rect = Rect::new(0, 0, w, h);
        self.scroll_fill = color::BLACK;
    }

    /// Store a raw value at canvas coordinates already clipped to the canvas
    #[inline]
    pub(crate) fn put_abs(&mut self, x: i32, y: i32, raw: u16) {
        let (x, y) = self.rotation.map(x, y, self.width, self.height);
        if let Some(store) = self.store.as_mut() {
            store.set(x as usize, y as usize, raw);
        }
    }

    /// Raw value at canvas coordinates already clipped to the canvas
    #[inline]
    pub(crate) fn get_abs(&self, x: i32, y: i32) -> u16 {
        let (x, y) = self.rotation.map(x, y, self.width, self.height);
        match &self.store {
            Some(store) => store.get(x as usize, y as usize),
            None => 0,
        }
    }

    /// Fill a canvas rectangle already clipped to the canvas.
    ///
    /// Byte aligned depths fill the first row and copy it down, packed depths
    /// fill row by row. Rotated 1 bpp canvases go pixel by pixel.
    pub(crate) fn fill_abs(&mut self, x: i32, y: i32, w: i32, h: i32, raw: u16) {
        if w < 1 || h < 1 {
            return;
        }
        if self.rotation != Rotation::Rotate0 {
            for yy in y..y + h {
                for xx in x..x + w {
                    self.put_abs(xx, yy, raw);
                }
            }
            return;
        }

        let Some(store) = self.store.as_mut() else {
            return;
        };
        let (x, y, w, h) = (x as usize, y as usize, w as usize, h as usize);
        match store.depth() {
            ColorDepth::Bpp16 | ColorDepth::Bpp8 => {
                store.fill_span(x, y, w, raw);
                store.replicate_row(x, y, w, h);
            }
            ColorDepth::Bpp4 | ColorDepth::Bpp1 => {
                for yy in y..y + h {
                    store.fill_span(x, yy, w, raw);
                }
            }
        }
    }

    /// Decoded color at canvas coordinates in bus order
    #[inline]
    pub(crate) fn bus_color_abs(&self, x: i32, y: i32) -> u16 {
        match &self.store {
            Some(store) if store.depth() == ColorDepth::Bpp16 => {
                store.get_swapped(x as usize, y as usize)
            }
            _ => color::swap(self.format.decode(self.get_abs(x, y))),
        }
    }
}

impl Destination for Sprite {
    /// The viewport's clip rectangle, in the canvas coordinates windows use
    fn bounds(&self) -> Rect {
        if self.store.is_none() || self.viewport.is_out_of_bounds() {
            return Rect::default();
        }
        self.viewport.clip()
    }

    fn pivot(&self) -> (i32, i32) {
        self.pivot
    }

    fn swap_bytes(&self) -> bool {
        self.swap_bytes
    }

    fn set_swap_bytes(&mut self, swap: bool) {
        self.swap_bytes = swap;
    }

    fn set_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        Sprite::set_window(self, x0, y0, x1, y1);
        Ok(())
    }

    fn push_pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError> {
        for &px in pixels {
            let native = if self.swap_bytes { px } else { color::swap(px) };
            let raw = self.format.quantize(native);
            self.write_color(raw);
        }
        Ok(())
    }

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
        for (row, line) in data.chunks_exact(w as usize).take(h as usize).enumerate() {
            for_each_run(line, transparent, |offset, run| {
                Sprite::push_image(
                    self,
                    x.saturating_add(offset as i32),
                    y.saturating_add(row as i32),
                    run.len() as i32,
                    1,
                    Image::Rgb565(run),
                );
                Ok::<(), DisplayError>(())
            })?;
        }
        Ok(())
    }
}

/// Configuration for a new [`Sprite`].
#[derive(Clone, Debug)]
pub struct SpriteBuilder {
    width: i32,
    height: i32,
    depth: ColorDepth,
    frames: u8,
    swap_bytes: bool,
    palette: Option<[u16; 16]>,
    bitmap_color: Option<(u16, u16)>,
}

impl SpriteBuilder {
    /// 16 bpp, single frame sprite of `width` x `height`
    pub fn new(width: i32, height: i32) -> Self {
        SpriteBuilder {
            width,
            height,
            depth: ColorDepth::Bpp16,
            frames: 1,
            swap_bytes: false,
            palette: None,
            bitmap_color: None,
        }
    }

    /// Color depth of the store
    pub fn color_depth(mut self, depth: ColorDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Number of frames, one or two
    pub fn frames(mut self, frames: u8) -> Self {
        self.frames = frames;
        self
    }

    /// See [`Sprite::set_swap_bytes`]
    pub fn swap_bytes(mut self, swap: bool) -> Self {
        self.swap_bytes = swap;
        self
    }

    /// 4 bpp palette
    pub fn palette(mut self, palette: [u16; 16]) -> Self {
        self.palette = Some(palette);
        self
    }

    /// 1 bpp foreground and background colors
    pub fn bitmap_color(mut self, fg: u16, bg: u16) -> Self {
        self.bitmap_color = Some((fg, bg));
        self
    }

    /// Allocate the sprite
    pub fn build(self) -> Result<Sprite, Error> {
        let mut sprite = Sprite::new(self.depth);
        sprite.swap_bytes = self.swap_bytes;
        if let Some(palette) = self.palette {
            sprite.create_palette(&palette);
        }
        if let Some((fg, bg)) = self.bitmap_color {
            sprite.set_bitmap_color(fg, bg);
        }
        sprite.create(self.width, self.height, self.frames)?;
        Ok(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::*;

    fn sprite(depth: ColorDepth, w: i32, h: i32) -> Sprite {
        Sprite::builder(w, h).color_depth(depth).build().unwrap()
    }

    #[test]
    fn uncreated_sprite_is_inert() {
        let mut s = Sprite::new(ColorDepth::Bpp8);
        assert!(!s.is_created());
        assert_eq!(s.color_depth(), None);
        assert_eq!(s.width(), 0);
        assert_eq!(s.read_pixel(0, 0), NO_COLOR);
        assert_eq!(s.read_pixel_value(0, 0), NO_VALUE);
        s.push_color(RED);
        s.set_viewport(0, 0, 4, 4, true);
        assert!(s.frame_buffer(1).is_none());
    }

    #[test]
    fn create_rejects_empty_sizes_and_keeps_existing() {
        let mut s = Sprite::default();
        assert_eq!(s.create(0, 4, 1), Err(Error::InvalidSize));
        assert!(!s.is_created());

        s.create(4, 3, 1).unwrap();
        s.create(10, 10, 1).unwrap();
        assert_eq!((s.width(), s.height()), (4, 3));
        assert_eq!(s.pivot(), (2, 1));
    }

    #[test]
    fn delete_frees_and_resets_palette() {
        let mut s = sprite(ColorDepth::Bpp4, 4, 4);
        s.set_palette_color(0, RED);
        s.delete();
        assert!(!s.is_created());
        assert_eq!(s.palette_color(0), BLACK);
        assert_eq!(s.height(), 0);
    }

    #[test]
    fn pixels_round_trip_at_every_depth() {
        let colors = [BLACK, WHITE, RED, 0x1234, 0xABCD, 0x07E0];
        for c in colors {
            let mut s = sprite(ColorDepth::Bpp16, 3, 3);
            s.put_abs(1, 1, s.format.encode(c));
            assert_eq!(s.read_pixel(1, 1), c);

            let mut s = sprite(ColorDepth::Bpp8, 3, 3);
            s.put_abs(1, 1, s.format.encode(c));
            assert_eq!(s.read_pixel(1, 1), rgb332_to_565(rgb565_to_332(c)));
        }

        let mut s = sprite(ColorDepth::Bpp4, 3, 3);
        for index in 0..16u16 {
            s.put_abs(1, 1, s.format.encode(index));
            assert_eq!(s.read_pixel(1, 1), DEFAULT_4BIT_PALETTE[index as usize]);
            assert_eq!(s.read_pixel_value(1, 1), index);
        }

        let mut s = sprite(ColorDepth::Bpp1, 3, 3);
        s.set_bitmap_color(RED, BLUE);
        s.put_abs(1, 1, s.format.encode(GREEN));
        assert_eq!(s.read_pixel(1, 1), RED);
        s.put_abs(1, 1, s.format.encode(BLACK));
        assert_eq!(s.read_pixel(1, 1), BLUE);
    }

    #[test]
    fn color_depth_change_reallocates() {
        let s = Sprite::builder(5, 4).frames(2).swap_bytes(true).build().unwrap();
        let s = s.with_color_depth(ColorDepth::Bpp8).unwrap();
        assert_eq!(s.color_depth(), Some(ColorDepth::Bpp8));
        assert_eq!((s.width(), s.height()), (5, 4));
        assert!(s.swap_bytes());
        assert_eq!(s.store.as_ref().unwrap().frames(), 2);

        let s = s.with_color_depth(ColorDepth::Bpp4).unwrap();
        assert_eq!(s.store.as_ref().unwrap().frames(), 1);
    }

    #[test]
    fn frame_buffers_are_selected_by_number() {
        let mut s = Sprite::builder(4, 4).frames(2).build().unwrap();
        s.put_abs(0, 0, RED);
        assert_eq!(s.frame_buffer(2).unwrap()[0], 0);
        s.put_abs(0, 0, BLUE);
        assert_eq!(s.frame_buffer(1).unwrap()[..2], [0xF8, 0x00]);
        assert_eq!(s.frame_buffer(2).unwrap()[..2], [0x00, 0x1F]);
    }

    #[test]
    fn palette_edits() {
        let mut s = sprite(ColorDepth::Bpp4, 2, 2);
        s.create_palette(&[RED, GREEN]);
        assert_eq!(s.palette_color(1), GREEN);
        assert_eq!(s.palette_color(2), 0);
        s.set_palette_color(16, BLUE);
        assert_eq!(s.palette_color(16), 0);
        s.create_palette(&[]);
        assert_eq!(s.palette_color(15), PINK);
    }

    #[test]
    fn equal_bitmap_colors_are_split() {
        let mut s = sprite(ColorDepth::Bpp1, 8, 8);
        s.set_bitmap_color(RED, RED);
        assert_eq!(
            s.format,
            PixelFormat::Mono {
                fg: RED,
                bg: !RED
            }
        );
    }

    #[test]
    fn rotation_only_applies_to_mono() {
        let mut s = sprite(ColorDepth::Bpp8, 10, 4);
        s.set_rotation(Rotation::Rotate90);
        assert_eq!(s.rotation(), Rotation::Rotate0);

        let mut s = sprite(ColorDepth::Bpp1, 10, 4);
        s.set_rotation(Rotation::Rotate90);
        assert_eq!((s.width(), s.height()), (4, 10));
        s.put_abs(0, 0, 1);
        assert_eq!(s.store.as_ref().unwrap().get(9, 0), 1);
        assert_eq!(s.read_pixel_value(0, 0), 1);
    }

    #[test]
    fn datum_viewport_reports_its_size() {
        let mut s = sprite(ColorDepth::Bpp16, 16, 16);
        s.set_viewport(4, 4, 6, 5, true);
        assert_eq!((s.width(), s.height()), (6, 5));
        s.set_viewport(4, 4, 6, 5, false);
        assert_eq!((s.width(), s.height()), (16, 16));
        s.set_viewport(40, 0, 6, 5, false);
        assert!(s.is_out_of_bounds());
        assert_eq!(s.read_pixel(0, 0), NO_COLOR);
        s.reset_viewport();
        assert!(!s.is_out_of_bounds());
    }

    #[test]
    fn streamed_writes_visit_window_once_in_order() {
        let mut s = sprite(ColorDepth::Bpp8, 6, 5);
        s.set_window(4, 3, 1, 1);
        for n in 0..12u16 {
            s.write_color(n + 1);
        }
        let mut expected = 1;
        for y in 0..5 {
            for x in 0..6 {
                let inside = (1..=4).contains(&x) && (1..=3).contains(&y);
                if inside {
                    assert_eq!(s.read_pixel_value(x, y), expected);
                    expected += 1;
                } else {
                    assert_eq!(s.read_pixel_value(x, y), 0);
                }
            }
        }
        assert_eq!(s.window.cursor(), (1, 1));
    }

    #[test]
    fn off_canvas_window_drains_into_spare_pixel() {
        let mut s = sprite(ColorDepth::Bpp16, 4, 4);
        s.set_window(10, 10, 20, 20);
        s.push_color_n(RED, 50);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(s.read_pixel(x, y), BLACK);
            }
        }
        assert_eq!(s.store.as_ref().unwrap().get(0, 4), RED);
    }

    #[test]
    fn pushed_pixels_follow_swap_flag() {
        let mut s = sprite(ColorDepth::Bpp16, 2, 1);
        Destination::set_window(&mut s, 0, 0, 1, 0).unwrap();
        s.push_pixels(&[swap(RED), swap(GREEN)]).unwrap();
        assert_eq!(s.read_pixel(0, 0), RED);
        assert_eq!(s.read_pixel(1, 0), GREEN);

        s.set_swap_bytes(true);
        Destination::set_window(&mut s, 0, 0, 1, 0).unwrap();
        s.push_pixels(&[BLUE, WHITE]).unwrap();
        assert_eq!(s.read_pixel(0, 0), BLUE);
        assert_eq!(s.read_pixel(1, 0), WHITE);
    }
}
