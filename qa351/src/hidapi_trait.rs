use crate::{Config, Error, Qa351, ReadWrite};
use hidapi::{HidApi, HidDevice};

/// An open hidapi handle with the read timeout it was opened with.
pub struct HidTransport {
    device: HidDevice,
    timeout_ms: i32,
}

impl HidTransport {
    pub fn new(device: HidDevice, timeout_ms: i32) -> Self {
        HidTransport { device, timeout_ms }
    }

    pub fn device(&self) -> &HidDevice {
        &self.device
    }
}

impl ReadWrite for HidTransport {
    fn write_report(&self, data: &[u8]) -> Result<usize, Error> {
        self.device.write(data).map_err(|e| e.into())
    }
    fn read_report(&self, buf: &mut [u8]) -> Result<usize, Error> {
        self.device
            .read_timeout(buf, self.timeout_ms)
            .map_err(|e| e.into())
    }
}

impl From<hidapi::HidError> for Error {
    fn from(err: hidapi::HidError) -> Self {
        Error::Transmission(err.to_string())
    }
}

impl Qa351<HidTransport> {
    /// Find the first device matching `config`'s vendor/product id, open it and reset it.
    pub fn open(config: Config) -> Result<Self, Error> {
        let api = HidApi::new()?;

        let device = api
            .device_list()
            .find(|info| {
                info.vendor_id() == config.vendor_id && info.product_id() == config.product_id
            })
            .ok_or(Error::DeviceNotFound)?
            .open_device(&api)?;

        log::debug!(
            "opened {:04x}:{:04x} {:?}",
            config.vendor_id,
            config.product_id,
            device.get_product_string()
        );

        let qa = Qa351::new(HidTransport::new(device, config.timeout_ms));
        qa.reset()?;

        Ok(qa)
    }
}
