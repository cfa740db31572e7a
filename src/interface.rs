//! Command and pixel transport of a MIPI DCS style panel
use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

/// Thin wrapper sending command bytes, parameters and pixel streams over a
/// [`WriteOnlyDataCommand`] bus.
pub struct DcsInterface<DI> {
    di: DI,
}

impl<DI> DcsInterface<DI>
where
    DI: WriteOnlyDataCommand,
{
    /// Wrap a display interface
    pub fn new(di: DI) -> Self {
        DcsInterface { di }
    }

    /// Send a bare command byte
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.di.send_commands(DataFormat::U8(&[command]))
    }

    /// Send a command followed by its parameter bytes
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.di.send_data(DataFormat::U8(data))
    }

    /// Stream 16 bit pixels, high byte of the color first on the wire.
    ///
    /// `native` pixels are RGB565 values; otherwise they are already byte
    /// swapped and go out low byte first.
    pub fn pixels(&mut self, pixels: &[u16], native: bool) -> Result<(), DisplayError> {
        let mut iter = pixels.iter().copied();
        if native {
            self.di.send_data(DataFormat::U16BEIter(&mut iter))
        } else {
            self.di.send_data(DataFormat::U16LEIter(&mut iter))
        }
    }

    /// Stream one native RGB565 color `count` times
    pub fn pixel_repeat(&mut self, color: u16, count: u32) -> Result<(), DisplayError> {
        let mut iter = core::iter::repeat(color).take(count as usize);
        self.di.send_data(DataFormat::U16BEIter(&mut iter))
    }

    /// Give the bus back
    pub fn release(self) -> DI {
        self.di
    }
}
