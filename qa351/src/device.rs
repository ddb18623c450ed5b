use crate::command::{transfer, xmit, Command};
use crate::{Counts, Error, Mode, ReadWrite, SampleRate, VoltageStream, INVALID_VALUE};
use scroll::{Pread, BE};

/// A QA351 on the other end of `T`.
///
/// The acquisition mode is tracked here rather than read from the device, and
/// gates which of the dc or rms reads may be issued.
pub struct Qa351<T: ReadWrite> {
    device: T,
    mode: Mode,
}

impl<T: ReadWrite> Qa351<T> {
    /// Wrap an already open transport. Starts out assuming dc mode.
    pub fn new(device: T) -> Self {
        Qa351 {
            device,
            mode: Mode::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn transport(&self) -> &T {
        &self.device
    }

    /// Release the underlying transport.
    pub fn close(self) -> T {
        self.device
    }

    pub fn get_firmware_version(&self) -> Result<Vec<u8>, Error> {
        transfer(Command::ReadFirmwareVersion, 0, &self.device)
    }

    pub fn get_product_id(&self) -> Result<Vec<u8>, Error> {
        transfer(Command::ReadSerialNumber, 0, &self.device)
    }

    /// Raw reading of the msp430's internal temperature sensor.
    pub fn get_msp_temp(&self) -> Result<Vec<u8>, Error> {
        transfer(Command::ReadTempSensor, 0, &self.device)
    }

    pub fn get_fifo_depth(&self) -> Result<Vec<u8>, Error> {
        transfer(Command::QueryFifoCount, 0, &self.device)
    }

    pub fn kick_led(&self) -> Result<(), Error> {
        xmit(Command::KickLed, 0, &self.device)
    }

    pub fn reset(&self) -> Result<(), Error> {
        xmit(Command::Reset, 0, &self.device)
    }

    /// Hand over to the bootstrap loader. The device stops answering afterwards.
    pub fn enter_bsl(&self) -> Result<(), Error> {
        xmit(Command::EnterBsl, 0, &self.device)
    }

    pub fn set_atten(&self, level: u8) -> Result<(), Error> {
        xmit(Command::SetAtten, level, &self.device)
    }

    pub fn set_pga(&self, gain: u8) -> Result<(), Error> {
        xmit(Command::SetPga, gain, &self.device)
    }

    pub fn set_sample_rate(&self, rate: SampleRate) -> Result<(), Error> {
        xmit(Command::SetSampleRate, rate as u8, &self.device)
    }

    /// Switch acquisition mode. Nothing is read back; if the write goes out the
    /// device is assumed to have taken it.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error> {
        xmit(Command::SetMode, mode as u8, &self.device)?;

        log::debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;

        Ok(())
    }

    pub fn start_rms_conversion(&self) -> Result<(), Error> {
        xmit(Command::StartRmsConversion, 0, &self.device)
    }

    /// Single dc conversion. Only legal in dc mode.
    pub fn read_voltage_counts(&self) -> Result<Counts, Error> {
        self.require(Mode::Dc)?;

        self.read_counts(Command::ReadAdc)
    }

    /// Result of the last rms conversion. Only legal in rms mode.
    pub fn read_rms_counts(&self) -> Result<Counts, Error> {
        self.require(Mode::Rms)?;

        self.read_counts(Command::RetrieveRmsReading)
    }

    /// Drain a block of samples from the device fifo.
    pub fn read_voltage_stream(&self) -> Result<VoltageStream, Error> {
        let data = transfer(Command::StreamData, 0, &self.device)?;

        Ok(VoltageStream::new(data))
    }

    fn require(&self, required: Mode) -> Result<(), Error> {
        if self.mode != required {
            return Err(Error::InvalidModeOperation {
                required,
                current: self.mode,
            });
        }
        Ok(())
    }

    fn read_counts(&self, command: Command) -> Result<Counts, Error> {
        let data = transfer(command, 0, &self.device)?;

        let counts: Counts = data.as_slice().pread_with(0, BE)?;
        if counts == Counts::Invalid {
            log::warn!("{:?} returned invalid value {:#010x}", command, INVALID_VALUE);
        }

        Ok(counts)
    }
}
