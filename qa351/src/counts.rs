use crate::Error;
use scroll::{ctx, Pread};

/// What the instrument sends instead of a reading when it has nothing valid to report.
pub const INVALID_VALUE: u32 = 0x80FF_FFFF;

/// A single dc or rms conversion result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Counts {
    /// 24 bit adc reading extended to 32 bits.
    Value(i32),
    /// The device reported `INVALID_VALUE`.
    Invalid,
}

impl Counts {
    /// The word as the device reported it after extension, `INVALID_VALUE` included.
    pub fn raw(self) -> u32 {
        match self {
            Counts::Value(val) => val as u32,
            Counts::Invalid => INVALID_VALUE,
        }
    }

    pub fn value(self) -> Option<i32> {
        match self {
            Counts::Value(val) => Some(val),
            Counts::Invalid => None,
        }
    }
}

/// Rebuild the top byte of a 24 bit reading.
///
/// The device decides on the byte at bits 16..24 being strictly greater than
/// 0x80 rather than on bit 23, so 0x80 itself is treated as positive.
pub fn extend_sign(val: u32) -> u32 {
    if (val >> 16) & 0xFF > 0x80 {
        val | 0xFF00_0000
    } else {
        val & 0x00FF_FFFF
    }
}

impl<'a> ctx::TryFromCtx<'a, scroll::Endian> for Counts {
    type Error = Error;
    fn try_from_ctx(this: &'a [u8], be: scroll::Endian) -> Result<(Self, usize), Self::Error> {
        if this.len() != 4 {
            return Err(Error::Parse);
        }

        let mut offset = 0;
        let val = this.gread_with::<u32>(&mut offset, be)?;

        //sentinel has to be caught before extension, it would survive it mangled
        if val == INVALID_VALUE {
            return Ok((Counts::Invalid, offset));
        }

        Ok((Counts::Value(extend_sign(val) as i32), offset))
    }
}
