//! In-RAM sprite canvases for TFT displays
//!
//! A [`Sprite`](sprite::Sprite) is a pixel buffer with its own addressing,
//! independent of any panel. Draw into it with the primitives, stream pixels
//! into a cursor window, scroll parts of it, and then composite it onto a
//! panel or another sprite, optionally keyed on a transparent color or
//! rotated about a pivot.
//!
//! ## Architecture
//!
//! The crate separates pixel storage from transport:
//! - **Sprites** (`Sprite`, `SpriteBuilder`) own a 1, 4, 8 or 16 bpp pixel
//!   store and implement every drawing and compositing operation
//! - **Destinations** (the `Destination` trait) take a windowed pixel stream,
//!   the way a TFT controller does. `DcsPanel` drives a MIPI DCS panel over
//!   [`display_interface`]; a `Sprite` is a destination too
//!
//! Compositing never leaves a destination in a different state: its
//! swap-bytes flag is restored and its write transaction closed on every
//! path, including errors.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use tft_sprite::prelude::*;
//!
//! // 1. Create the panel
//! let mut panel = DcsPanel::new(di, 240, 320);
//! panel.hard_reset(&mut rst, &mut delay)?;
//! panel.init(&mut delay)?;
//!
//! // 2. Create a sprite and draw into it
//! let mut needle = Sprite::builder(40, 8).color_depth(ColorDepth::Bpp8).build()?;
//! needle.fill_sprite(color::BLACK);
//! needle.fill_rect(0, 2, 36, 4, color::RED);
//! needle.set_pivot(4, 4);
//!
//! // 3. Composite it, rotated about the panel pivot, keyed on black
//! needle.push_rotated(&mut panel, 45, Some(color::BLACK))?;
//! ```
//!
//! With the `graphics` feature (on by default) a sprite is an
//! `embedded_graphics::DrawTarget<Color = Rgb565>`, so fonts and shapes can
//! be rendered into it.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

mod cmd;
pub mod color;
pub mod driver;
pub mod error;
pub mod format;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod image;
pub mod interface;
pub mod rotation;
pub mod sprite;
pub mod store;
pub mod target;
pub mod viewport;

mod compose;
mod draw;
mod flag;
mod rotate;
mod scroll;

pub use rotate::RotatedBox;

/// Useful exports
pub mod prelude {
    pub use crate::color;
    pub use crate::driver::{DcsPanel, InitStep};
    pub use crate::error::Error;
    pub use crate::format::{ColorDepth, PixelFormat};
    pub use crate::image::Image;
    pub use crate::rotate::RotatedBox;
    pub use crate::rotation::Rotation;
    pub use crate::sprite::{Sprite, SpriteBuilder};
    pub use crate::target::Destination;
    pub use crate::viewport::{Rect, Viewport};
}
