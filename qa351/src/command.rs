use crate::{Error, ReadWrite};
use core::convert::TryFrom;
use scroll::{Pwrite, BE};

/// Every report on the wire, in and out, is exactly this many bytes.
pub const REPORT_SIZE: usize = 64;

/// First byte of every outbound frame, and the ack marker on every inbound one.
pub const SYNC: u8 = 0x3F;

/// Sync and length bytes eat two bytes of the report.
pub const MAX_PAYLOAD: usize = REPORT_SIZE - 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    //blink the front panel led
    KickLed = 0x00,
    //single dc conversion, 4 bytes big endian
    ReadAdc = 0x01,
    SetPga = 0x02,
    SetAtten = 0x03,
    //drain the sample fifo, 4 bytes per sample
    StreamData = 0x04,
    QueryFifoCount = 0x05,
    //0 slow, 1 fast
    SetSampleRate = 0x06,
    //0 dc, 1 rms
    SetMode = 0x0C,
    StartRmsConversion = 0x0D,
    //4 bytes big endian, only meaningful in rms mode
    RetrieveRmsReading = 0x0E,
    ReadTempSensor = 0x33,
    Reset = 0xFB,
    ReadSerialNumber = 0xFD,
    ReadFirmwareVersion = 0xFE,
    //jump into the msp430 bootstrap loader, device drops off the bus
    EnterBsl = 0xFF,
}

impl Command {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = Error;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0x00 => Ok(Command::KickLed),
            0x01 => Ok(Command::ReadAdc),
            0x02 => Ok(Command::SetPga),
            0x03 => Ok(Command::SetAtten),
            0x04 => Ok(Command::StreamData),
            0x05 => Ok(Command::QueryFifoCount),
            0x06 => Ok(Command::SetSampleRate),
            0x0C => Ok(Command::SetMode),
            0x0D => Ok(Command::StartRmsConversion),
            0x0E => Ok(Command::RetrieveRmsReading),
            0x33 => Ok(Command::ReadTempSensor),
            0xFB => Ok(Command::Reset),
            0xFD => Ok(Command::ReadSerialNumber),
            0xFE => Ok(Command::ReadFirmwareVersion),
            0xFF => Ok(Command::EnterBsl),
            _ => Err(Error::Parse),
        }
    }
}

/// Writes `[SYNC, len, payload..]` into `dst` and returns how many bytes were written.
/// Anything in `dst` past that is left alone, so hand in a zeroed report to get padding.
pub fn encode_frame(payload: &[u8], dst: &mut [u8]) -> Result<usize, Error> {
    if payload.len() > MAX_PAYLOAD {
        return Err(Error::FrameTooLarge(payload.len()));
    }

    let mut offset = 0;

    dst.gwrite_with(SYNC, &mut offset, BE)?;
    dst.gwrite_with(payload.len() as u8, &mut offset, BE)?;
    dst.gwrite(payload, &mut offset)?;

    Ok(offset)
}

/// Strips the envelope off an inbound report, returning the declared payload.
pub fn decode_payload(report: &[u8]) -> Result<&[u8], Error> {
    if report.len() < 2 {
        return Err(Error::Parse);
    }

    if report[0] != SYNC {
        return Err(Error::BadSync(report[0]));
    }

    let len = report[1];
    let end = 2 + len as usize;
    if len as usize > MAX_PAYLOAD || end > report.len() {
        return Err(Error::TruncatedPayload(len));
    }

    Ok(&report[2..end])
}

/// Send a single report carrying `command` and its argument byte. Commands without an argument send 0.
pub(crate) fn xmit<T: ReadWrite>(command: Command, arg: u8, d: &T) -> Result<(), Error> {
    let mut report = [0_u8; REPORT_SIZE];

    let len = encode_frame(&[command.opcode(), arg], &mut report)?;

    log::trace!("{:?} transmitting: {:02X?}", command, &report[..len]);

    d.write_report(&report)?;

    Ok(())
}

/// Read one report and hand back its payload, borrowed from `buf`.
pub(crate) fn rx<'a, T: ReadWrite>(buf: &'a mut [u8], d: &T) -> Result<&'a [u8], Error> {
    let count = d.read_report(buf)?;

    //read_timeout hands back zero bytes when nothing arrived in time
    if count == 0 {
        return Err(Error::Timeout);
    }

    log::trace!("received: {:02X?}", &buf[..count]);

    decode_payload(&buf[..count])
}

/// One full exchange, request out and response payload back.
pub(crate) fn transfer<T: ReadWrite>(command: Command, arg: u8, d: &T) -> Result<Vec<u8>, Error> {
    xmit(command, arg, d)?;

    let mut buf = [0_u8; REPORT_SIZE];
    let payload = rx(&mut buf, d)?;

    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MyMock;
    use std::cell::RefCell;

    const NO_ARG: [Command; 11] = [
        Command::KickLed,
        Command::ReadAdc,
        Command::StreamData,
        Command::QueryFifoCount,
        Command::StartRmsConversion,
        Command::RetrieveRmsReading,
        Command::ReadTempSensor,
        Command::Reset,
        Command::ReadSerialNumber,
        Command::ReadFirmwareVersion,
        Command::EnterBsl,
    ];

    #[test]
    fn no_argument_frames() {
        for command in NO_ARG.iter() {
            let written = RefCell::new(vec![]);
            let mock = MyMock {
                reader: Vec::new,
                writer: |data: &[u8]| {
                    written.borrow_mut().extend_from_slice(data);
                    data.len()
                },
            };

            xmit(*command, 0, &mock).unwrap();

            let mut expected = vec![0_u8; REPORT_SIZE];
            expected[..4].copy_from_slice(&[0x3F, 0x02, command.opcode(), 0x00]);
            assert_eq!(written.into_inner(), expected);
        }
    }

    #[test]
    fn argument_lands_after_opcode() {
        let mut report = [0_u8; REPORT_SIZE];
        let len = encode_frame(&[Command::SetAtten.opcode(), 0x02], &mut report).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&report[..4], &[0x3F, 0x02, 0x03, 0x02]);
        assert!(report[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn frame_round_trip() {
        for len in [0_usize, 1, 2, 17, MAX_PAYLOAD].iter() {
            let payload: Vec<u8> = (0..*len).map(|i| (i * 7) as u8).collect();
            let mut report = [0_u8; REPORT_SIZE];

            encode_frame(&payload, &mut report).unwrap();

            assert_eq!(decode_payload(&report).unwrap(), &payload[..]);
        }
    }

    #[test]
    fn frame_too_large() {
        let payload = [0xAA_u8; MAX_PAYLOAD + 1];
        let mut report = [0_u8; 128];

        assert_eq!(
            encode_frame(&payload, &mut report),
            Err(Error::FrameTooLarge(63))
        );
    }

    #[test]
    fn bad_sync() {
        let mut report = [0_u8; REPORT_SIZE];
        report[1] = 0x04;

        assert_eq!(decode_payload(&report), Err(Error::BadSync(0x00)));

        report[0] = 0x3E;
        assert_eq!(decode_payload(&report), Err(Error::BadSync(0x3E)));
    }

    #[test]
    fn truncated_payload() {
        let mut report = [0_u8; REPORT_SIZE];
        report[0] = SYNC;
        report[1] = 63;

        assert_eq!(decode_payload(&report), Err(Error::TruncatedPayload(63)));
    }

    #[test]
    fn short_read_bounds_payload() {
        let mock = MyMock {
            reader: || vec![0x3F, 0x04, 0x01, 0x02],
            writer: |data: &[u8]| data.len(),
        };

        assert_eq!(
            transfer(Command::ReadAdc, 0, &mock),
            Err(Error::TruncatedPayload(4))
        );
    }

    #[test]
    fn opcode_table() {
        let all = [
            (Command::KickLed, 0x00),
            (Command::ReadAdc, 0x01),
            (Command::SetPga, 0x02),
            (Command::SetAtten, 0x03),
            (Command::StreamData, 0x04),
            (Command::QueryFifoCount, 0x05),
            (Command::SetSampleRate, 0x06),
            (Command::SetMode, 0x0C),
            (Command::StartRmsConversion, 0x0D),
            (Command::RetrieveRmsReading, 0x0E),
            (Command::ReadTempSensor, 0x33),
            (Command::Reset, 0xFB),
            (Command::ReadSerialNumber, 0xFD),
            (Command::ReadFirmwareVersion, 0xFE),
            (Command::EnterBsl, 0xFF),
        ];

        for (command, opcode) in all.iter() {
            assert_eq!(command.opcode(), *opcode);
            assert_eq!(Command::try_from(*opcode), Ok(*command));
        }

        assert_eq!(Command::try_from(0x07), Err(Error::Parse));
    }

    #[test]
    fn empty_read_is_timeout() {
        let mock = MyMock {
            reader: Vec::new,
            writer: |data: &[u8]| data.len(),
        };

        assert_eq!(
            transfer(Command::ReadFirmwareVersion, 0, &mock),
            Err(Error::Timeout)
        );
    }
}
