//! embedded-graphics support
//!
//! A [`Sprite`] is a [`DrawTarget`] for [`Rgb565`] colors. Colors are
//! matched to the sprite's depth: converted to RGB332 at 8 bpp, mapped to
//! the nearest palette entry at 4 bpp and set unless equal to the bitmap
//! background at 1 bpp. Drawing goes through the viewport like every other
//! primitive.
use core::convert::Infallible;

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::sprite::Sprite;

impl DrawTarget for Sprite {
    type Error = Infallible;
    type Color = Rgb565;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if self.store.is_none() {
            return Ok(());
        }
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.viewport.map_point(point.x, point.y) {
                let raw = self.format.quantize(color.into_storage());
                self.put_abs(x, y, raw);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let raw = self.format.quantize(color.into_storage());
        self.fill_rect_raw(
            area.top_left.x,
            area.top_left.y,
            area.size.width as i32,
            area.size.height as i32,
            raw,
        );
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let raw = self.format.quantize(color.into_storage());
        self.fill_sprite_raw(raw);
        Ok(())
    }
}

impl OriginDimensions for Sprite {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::*;
    use crate::format::ColorDepth;
    use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};

    #[test]
    fn size_follows_datum_viewport() {
        let mut s = Sprite::builder(20, 10).build().unwrap();
        assert_eq!(s.size(), Size::new(20, 10));
        s.set_viewport(2, 2, 5, 4, true);
        assert_eq!(s.size(), Size::new(5, 4));
        assert_eq!(Sprite::default().size(), Size::zero());
    }

    #[test]
    fn primitives_rasterize_into_sprite() {
        let mut s = Sprite::builder(16, 16).build().unwrap();
        s.clear(Rgb565::BLUE).unwrap();
        Rectangle::new(Point::new(2, 3), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut s)
            .unwrap();
        Line::new(Point::new(0, 15), Point::new(15, 15))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::GREEN, 1))
            .draw(&mut s)
            .unwrap();

        assert_eq!(s.read_pixel(2, 3), RED);
        assert_eq!(s.read_pixel(5, 4), RED);
        assert_eq!(s.read_pixel(6, 4), BLUE);
        assert_eq!(s.read_pixel(7, 15), GREEN);
        assert_eq!(s.read_pixel(7, 14), BLUE);
    }

    #[test]
    fn drawing_is_clipped_to_viewport() {
        let mut s = Sprite::builder(12, 12).color_depth(ColorDepth::Bpp8).build().unwrap();
        s.set_viewport(4, 4, 4, 4, false);
        Circle::new(Point::new(0, 0), 12)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut s)
            .unwrap();
        s.reset_viewport();
        for y in 0..12 {
            for x in 0..12 {
                let inside = (4..8).contains(&x) && (4..8).contains(&y);
                assert_eq!(s.read_pixel_value(x, y) != 0, inside, "{x},{y}");
            }
        }
    }

    #[test]
    fn colors_are_matched_to_low_depths() {
        let mut s = Sprite::builder(4, 1).color_depth(ColorDepth::Bpp4).build().unwrap();
        Pixel(Point::new(1, 0), Rgb565::RED).draw(&mut s).unwrap();
        Pixel(Point::new(2, 0), Rgb565::new(31, 62, 0)).draw(&mut s).unwrap();
        assert_eq!(s.read_pixel_value(1, 0), 2);
        assert_eq!(s.read_pixel(2, 0), YELLOW);

        let mut s = Sprite::builder(4, 1).color_depth(ColorDepth::Bpp1).build().unwrap();
        Pixel(Point::new(0, 0), Rgb565::RED).draw(&mut s).unwrap();
        Pixel(Point::new(1, 0), Rgb565::BLACK).draw(&mut s).unwrap();
        assert_eq!(s.read_pixel_value(0, 0), 1);
        assert_eq!(s.read_pixel_value(1, 0), 0);
    }
}
