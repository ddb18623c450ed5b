use crate::{Error, ReadWrite};

/// A fake device. `reader` produces each inbound report, an empty vec reads
/// as a timeout. `writer` sees every outbound report and returns the count written.
pub struct MyMock<R, W>
where
    R: Fn() -> Vec<u8>,
    W: Fn(&[u8]) -> usize,
{
    pub reader: R,
    pub writer: W,
}

impl<R, W> ReadWrite for MyMock<R, W>
where
    R: Fn() -> Vec<u8>,
    W: Fn(&[u8]) -> usize,
{
    fn write_report(&self, data: &[u8]) -> Result<usize, Error> {
        let len = (self.writer)(data);

        Ok(len)
    }
    fn read_report(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let data = (self.reader)();

        for (slot, val) in buf.iter_mut().zip(data.iter()) {
            *slot = *val
        }

        Ok(data.len().min(buf.len()))
    }
}

/// Build a well formed inbound report around `payload`.
pub fn report(payload: &[u8]) -> Result<Vec<u8>, Error> {
    let mut report = vec![0_u8; crate::REPORT_SIZE];

    crate::encode_frame(payload, &mut report)?;

    Ok(report)
}
