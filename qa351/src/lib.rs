/// Opcodes, framing and the request/response primitive.
mod command;
pub use command::*;

/// Voltage and RMS count responses, with the 24 bit sign extension quirk.
mod counts;
pub use counts::*;

/// Multi sample blocks returned by the stream command.
mod stream;
pub use stream::*;

/// Acquisition mode, sample rate and connection settings.
mod config;
pub use config::*;

/// The instrument itself. Owns the transport and the tracked acquisition mode.
mod device;
pub use device::*;

/// Closure driven transport for exercising the protocol without hardware.
pub mod mock;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no QA351 found with the requested vendor/product id")]
    DeviceNotFound,
    #[error("bad sync byte {0:#04x} in inbound report")]
    BadSync(u8),
    #[error("declared payload length {0} runs past the end of the report")]
    TruncatedPayload(u8),
    #[error("payload of {0} bytes does not fit in a report")]
    FrameTooLarge(usize),
    #[error("operation requires {required:?} mode but device is in {current:?} mode")]
    InvalidModeOperation { required: Mode, current: Mode },
    #[error("unexpected payload contents")]
    Parse,
    #[error("hid transmission failed: {0}")]
    Transmission(String),
    #[error("timed out waiting for a report")]
    Timeout,
}

///trait to implement HID devices
pub trait ReadWrite {
    fn write_report(&self, data: &[u8]) -> Result<usize, Error>;
    fn read_report(&self, buf: &mut [u8]) -> Result<usize, Error>;
}

impl From<scroll::Error> for Error {
    fn from(_err: scroll::Error) -> Self {
        Error::Parse
    }
}

#[cfg(feature = "hidapi")]
mod hidapi_trait;
#[cfg(feature = "hidapi")]
pub use hidapi_trait::*;
