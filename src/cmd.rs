pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    pub const NOP: u8 = 0x00;
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_IN: u8 = 0x10;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERT_OFF: u8 = 0x20;
    pub const INVERT_ON: u8 = 0x21;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS_CTRL: u8 = 0x36;
    pub const PIXEL_FORMAT_SET: u8 = 0x3A;
}
