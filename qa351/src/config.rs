/// Acquisition mode. The device never reports it back, so this is whatever was last set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Single shot dc conversions via the read adc command.
    Dc = 0x00,
    /// True rms conversions, started and then retrieved.
    Rms = 0x01,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Dc
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleRate {
    Slow = 0x00,
    Fast = 0x01,
}

/// Connection settings, fixed for the lifetime of an open device.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub vendor_id: u16,
    pub product_id: u16,
    /// How long a single report read may block, in milliseconds.
    pub timeout_ms: i32,
}

impl Config {
    pub fn vendor_id(mut self, vendor_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self
    }

    pub fn product_id(mut self, product_id: u16) -> Self {
        self.product_id = product_id;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            vendor_id: 0x2047,
            product_id: 0x0301,
            timeout_ms: 50,
        }
    }
}
