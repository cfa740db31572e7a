//! Reference panel transport for compositing sprites
//!
//! [`DcsPanel`] drives a MIPI DCS style TFT controller (ILI9341, ST7789,
//! ST7735 and friends share the command set used here) through
//! [`display_interface`]. It implements [`Destination`], so sprites can be
//! pushed, keyed and rotated straight onto the glass.
pub use display_interface::DisplayError;

use display_interface::WriteOnlyDataCommand;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::interface::DcsInterface;
use crate::rotation::Rotation;
use crate::target::Destination;
use crate::viewport::Rect;
use crate::{cmd::Cmd, flag::Flag};

use log::debug;

/// Default init sequence if none is provided
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::SwReset,
    InitStep::DelayMs(150),
    InitStep::Cmd(Cmd::SLEEP_OUT),
    InitStep::DelayMs(120),
    // 16 bit pixels on the bus
    InitStep::CmdData(Cmd::PIXEL_FORMAT_SET, &[Flag::PIXEL_FORMAT_16BIT]),
    InitStep::Madctl,
    InitStep::Cmd(Cmd::DISPLAY_ON),
    InitStep::DelayMs(20),
];

/// Steps that a panel specific init sequence can contain.
/// Keep variants minimal so sequences can live in static arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Send the software reset command
    SwReset,
    /// Wait a number of milliseconds
    DelayMs(u8),
    /// Send a bare command byte
    Cmd(u8),
    /// Send a command with a static data slice
    CmdData(u8, &'static [u8]),
    /// Send the memory access control byte for the current orientation
    Madctl,
}

/// A configured panel on a command/data bus.
pub struct DcsPanel<DI> {
    interface: DcsInterface<DI>,
    /// size in the current orientation
    width: u16,
    height: u16,
    col_offset: u16,
    row_offset: u16,
    orientation: Rotation,
    bgr: bool,
    pivot: (i32, i32),
    swap_bytes: bool,
    init_sequence: &'static [InitStep],
}

impl<DI> DcsPanel<DI>
where
    DI: WriteOnlyDataCommand,
{
    /// Panel of `width` x `height` pixels in its native orientation.
    pub fn new(di: DI, width: u16, height: u16) -> Self {
        Self::with_init_sequence(di, width, height, DEFAULT_INIT_SEQUENCE)
    }

    /// Panel that runs its own init sequence on [`DcsPanel::init`].
    pub fn with_init_sequence(
        di: DI,
        width: u16,
        height: u16,
        init_sequence: &'static [InitStep],
    ) -> Self {
        debug!("creating new DcsPanel instance {}x{}", width, height);
        DcsPanel {
            interface: DcsInterface::new(di),
            width,
            height,
            col_offset: 0,
            row_offset: 0,
            orientation: Rotation::Rotate0,
            bgr: false,
            pivot: (i32::from(width) / 2, i32::from(height) / 2),
            swap_bytes: true,
            init_sequence,
        }
    }

    /// Pulse the reset line
    pub fn hard_reset<RST>(
        &mut self,
        rst: &mut RST,
        delay: &mut impl DelayNs,
    ) -> Result<(), DisplayError>
    where
        RST: OutputPin,
    {
        debug!("hard reset");
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(1);
        rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(10);
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(120);
        Ok(())
    }

    /// Run the init sequence
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("initialising panel");
        for step in self.init_sequence {
            debug!("init step: {:?}", step);
            match *step {
                InitStep::SwReset => self.interface.cmd(Cmd::SW_RESET)?,
                InitStep::DelayMs(ms) => delay.delay_ms(u32::from(ms)),
                InitStep::Cmd(c) => self.interface.cmd(c)?,
                InitStep::CmdData(c, d) => self.interface.cmd_with_data(c, d)?,
                InitStep::Madctl => {
                    let madctl = self.madctl();
                    self.interface
                        .cmd_with_data(Cmd::MEMORY_ACCESS_CTRL, &[madctl])?;
                }
            }
        }
        debug!("init sequence complete");
        Ok(())
    }

    /// Turn the panel; width and height trade places on quarter turns.
    pub fn set_orientation(&mut self, orientation: Rotation) -> Result<(), DisplayError> {
        debug!("set_orientation: {:?}", orientation);
        if orientation.swaps_axes() != self.orientation.swaps_axes() {
            core::mem::swap(&mut self.width, &mut self.height);
            core::mem::swap(&mut self.col_offset, &mut self.row_offset);
        }
        self.orientation = orientation;
        let madctl = self.madctl();
        self.interface
            .cmd_with_data(Cmd::MEMORY_ACCESS_CTRL, &[madctl])
    }

    /// Current orientation
    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Use BGR subpixel order from the next orientation change on
    pub fn set_bgr(&mut self, bgr: bool) {
        self.bgr = bgr;
    }

    /// Offset of the visible area inside controller RAM, for panels smaller
    /// than their controller.
    pub fn set_offset(&mut self, col: u16, row: u16) {
        self.col_offset = col;
        self.row_offset = row;
    }

    /// Set the point rotated sprites are centred on
    pub fn set_pivot(&mut self, x: i32, y: i32) {
        self.pivot = (x, y);
    }

    /// Invert all colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.interface.cmd(if inverted {
            Cmd::INVERT_ON
        } else {
            Cmd::INVERT_OFF
        })
    }

    /// Width in the current orientation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in the current orientation
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Fill the whole panel with one RGB565 color
    pub fn clear(&mut self, color: u16) -> Result<(), DisplayError> {
        debug!("clearing panel to {:#06x}", color);
        self.address_window(0, 0, self.width.saturating_sub(1), self.height.saturating_sub(1))?;
        self.interface
            .pixel_repeat(color, u32::from(self.width) * u32::from(self.height))
    }

    /// Give the bus back
    pub fn release(self) -> DI {
        self.interface.release()
    }

    fn madctl(&self) -> u8 {
        let rotation = match self.orientation {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => Flag::MADCTL_MX | Flag::MADCTL_MV,
            Rotation::Rotate180 => Flag::MADCTL_MX | Flag::MADCTL_MY,
            Rotation::Rotate270 => Flag::MADCTL_MY | Flag::MADCTL_MV,
        };
        if self.bgr {
            rotation | Flag::MADCTL_BGR
        } else {
            rotation
        }
    }

    fn address_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let (x0, x1) = (x0 + self.col_offset, x1 + self.col_offset);
        let (y0, y1) = (y0 + self.row_offset, y1 + self.row_offset);
        self.interface.cmd_with_data(
            Cmd::COLUMN_ADDRESS_SET,
            &[(x0 >> 8) as u8, (x0 & 0xFF) as u8, (x1 >> 8) as u8, (x1 & 0xFF) as u8],
        )?;
        self.interface.cmd_with_data(
            Cmd::ROW_ADDRESS_SET,
            &[(y0 >> 8) as u8, (y0 & 0xFF) as u8, (y1 >> 8) as u8, (y1 & 0xFF) as u8],
        )?;
        self.interface.cmd(Cmd::MEMORY_WRITE)
    }
}

impl<DI> Destination for DcsPanel<DI>
where
    DI: WriteOnlyDataCommand,
{
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, i32::from(self.width), i32::from(self.height))
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
        let clamp = |v: i32, max: u16| v.min(i32::from(max) - 1).max(0) as u16;
        self.address_window(
            clamp(x0, self.width),
            clamp(y0, self.height),
            clamp(x1, self.width),
            clamp(y1, self.height),
        )
    }

    fn push_pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError> {
        self.interface.pixels(pixels, self.swap_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::*;
    use crate::sprite::Sprite;
    use alloc::vec;
    use alloc::vec::Vec;
    use display_interface::DataFormat;

    #[derive(Debug, PartialEq, Eq)]
    enum Sent {
        Cmd(u8),
        Data(Vec<u8>),
    }

    #[derive(Default)]
    struct RecordingBus {
        sent: Vec<Sent>,
    }

    fn bytes(data: DataFormat<'_>) -> Vec<u8> {
        match data {
            DataFormat::U8(b) => b.to_vec(),
            DataFormat::U8Iter(it) => it.collect(),
            DataFormat::U16BEIter(it) => it.flat_map(u16::to_be_bytes).collect(),
            DataFormat::U16LEIter(it) => it.flat_map(u16::to_le_bytes).collect(),
            _ => Vec::new(),
        }
    }

    impl WriteOnlyDataCommand for RecordingBus {
        fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
            for c in bytes(cmd) {
                self.sent.push(Sent::Cmd(c));
            }
            Ok(())
        }

        fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
            self.sent.push(Sent::Data(bytes(buf)));
            Ok(())
        }
    }

    struct NoDelay {
        total_ms: u32,
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }
    }

    struct Pin {
        levels: Vec<bool>,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    fn panel(w: u16, h: u16) -> DcsPanel<RecordingBus> {
        DcsPanel::new(RecordingBus::default(), w, h)
    }

    #[test]
    fn init_runs_every_step() {
        let mut p = panel(240, 320);
        let mut delay = NoDelay { total_ms: 0 };
        p.init(&mut delay).unwrap();
        let sent = p.release().sent;
        assert_eq!(
            sent,
            vec![
                Sent::Cmd(Cmd::SW_RESET),
                Sent::Cmd(Cmd::SLEEP_OUT),
                Sent::Cmd(Cmd::PIXEL_FORMAT_SET),
                Sent::Data(vec![0x55]),
                Sent::Cmd(Cmd::MEMORY_ACCESS_CTRL),
                Sent::Data(vec![0x00]),
                Sent::Cmd(Cmd::DISPLAY_ON),
            ]
        );
        assert_eq!(delay.total_ms, 290);
    }

    #[test]
    fn hard_reset_pulses_low() {
        let mut p = panel(10, 10);
        let mut rst = Pin { levels: Vec::new() };
        let mut delay = NoDelay { total_ms: 0 };
        p.hard_reset(&mut rst, &mut delay).unwrap();
        assert_eq!(rst.levels, vec![true, false, true]);
    }

    #[test]
    fn orientation_swaps_axes_and_sets_madctl() {
        let mut p = panel(240, 320);
        p.set_bgr(true);
        p.set_orientation(Rotation::Rotate90).unwrap();
        assert_eq!((p.width(), p.height()), (320, 240));
        p.set_orientation(Rotation::Rotate270).unwrap();
        assert_eq!((p.width(), p.height()), (320, 240));
        p.set_orientation(Rotation::Rotate180).unwrap();
        assert_eq!((p.width(), p.height()), (240, 320));
        let sent = p.release().sent;
        assert_eq!(sent[1], Sent::Data(vec![0x40 | 0x20 | 0x08]));
        assert_eq!(sent[3], Sent::Data(vec![0x80 | 0x20 | 0x08]));
        assert_eq!(sent[5], Sent::Data(vec![0x40 | 0x80 | 0x08]));
    }

    #[test]
    fn window_uses_offsets() {
        let mut p = panel(128, 160);
        p.set_offset(2, 1);
        Destination::set_window(&mut p, 0, 0, 127, 300).unwrap();
        let sent = p.release().sent;
        assert_eq!(
            sent,
            vec![
                Sent::Cmd(Cmd::COLUMN_ADDRESS_SET),
                Sent::Data(vec![0, 2, 0, 129]),
                Sent::Cmd(Cmd::ROW_ADDRESS_SET),
                Sent::Data(vec![0, 1, 0, 160]),
                Sent::Cmd(Cmd::MEMORY_WRITE),
            ]
        );
    }

    #[test]
    fn pixels_go_out_high_byte_first() {
        let mut p = panel(4, 4);
        p.push_pixels(&[RED]).unwrap();
        p.set_swap_bytes(false);
        p.push_pixels(&[swap(RED)]).unwrap();
        let sent = p.release().sent;
        assert_eq!(sent[0], Sent::Data(vec![0xF8, 0x00]));
        assert_eq!(sent[1], Sent::Data(vec![0xF8, 0x00]));
    }

    #[test]
    fn sprite_push_restores_swap_flag() {
        let mut s = Sprite::builder(2, 1).build().unwrap();
        s.fill_sprite(BLUE);
        let mut p = panel(4, 4);
        s.push_sprite(&mut p, 1, 1).unwrap();
        assert!(p.swap_bytes());
        let sent = p.release().sent;
        assert_eq!(sent.last(), Some(&Sent::Data(vec![0x00, 0x1F, 0x00, 0x1F])));
    }

    #[test]
    fn clear_fills_whole_panel() {
        let mut p = panel(3, 2);
        p.clear(WHITE).unwrap();
        let sent = p.release().sent;
        assert_eq!(sent.last(), Some(&Sent::Data(vec![0xFF; 12])));
    }
}
