pub struct Flag;
#[allow(dead_code)]
impl Flag {
    pub const MADCTL_MY: u8 = 0x80;
    pub const MADCTL_MX: u8 = 0x40;
    pub const MADCTL_MV: u8 = 0x20;
    pub const MADCTL_ML: u8 = 0x10;
    pub const MADCTL_BGR: u8 = 0x08;
    pub const PIXEL_FORMAT_16BIT: u8 = 0x55;
}
