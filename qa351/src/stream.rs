use core::convert::TryInto;

/// One entry of a streamed block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sample {
    pub sequence_id: u8,
    pub value: i32,
}

/// Response to the stream command, a run of 4 byte records.
///
/// The first byte of every record is both the sequence id and the most
/// significant byte of the signed big endian value. Whether the firmware
/// really overlaps the two has not been confirmed against hardware docs.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageStream {
    data: Vec<u8>,
}

impl VoltageStream {
    pub fn new(data: Vec<u8>) -> Self {
        VoltageStream { data }
    }

    /// Samples in payload order. A trailing partial record is dropped.
    pub fn iter(&self) -> impl '_ + Iterator<Item = Sample> {
        self.data.chunks_exact(4).map(|chunk| {
            //no panic, chunks exact is always &[u8; 4]
            let word: [u8; 4] = chunk.try_into().unwrap();
            Sample {
                sequence_id: word[0],
                value: i32::from_be_bytes(word),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_byte_dropped() {
        let data = [0x01, 0x00, 0x00, 0x10, 0x02, 0x00, 0x00, 0x20, 0x03];
        let stream = VoltageStream::new(data.to_vec());

        let samples: Vec<Sample> = stream.iter().collect();

        assert_eq!(stream.len(), 2);
        assert_eq!(
            samples,
            vec![
                Sample {
                    sequence_id: 0x01,
                    value: 0x0100_0010,
                },
                Sample {
                    sequence_id: 0x02,
                    value: 0x0200_0020,
                },
            ]
        );
    }

    #[test]
    fn zeros() {
        let stream = VoltageStream::new(vec![0; 8]);

        let samples: Vec<(u8, i32)> = stream.iter().map(|s| (s.sequence_id, s.value)).collect();

        assert_eq!(samples, vec![(0, 0), (0, 0)]);
    }

    #[test]
    fn sequence_id_aliases_sign_byte() {
        let stream = VoltageStream::new(vec![0xFF, 0xFF, 0xFF, 0xFE]);

        let sample = stream.iter().next().unwrap();

        assert_eq!(sample.sequence_id, 0xFF);
        assert_eq!(sample.value, -2);
    }

    #[test]
    fn restartable() {
        let stream = VoltageStream::new(vec![0x05, 0x00, 0x00, 0x01]);

        assert_eq!(stream.iter().count(), 1);
        assert_eq!(stream.iter().count(), 1);
        assert!(VoltageStream::new(vec![1, 2, 3]).is_empty());
    }
}
