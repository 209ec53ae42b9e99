//! BitReader: reads a packed bitstream for huffpress.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. When the source
//! also supports seek(), the reader can be restarted, which the two-pass compressor needs.
//!

use std::io::{self, Read, Seek, SeekFrom};

use super::{BitSource, RewindableSource};

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads a bit-packed stream from any byte source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    /// Count of valid bytes in the buffer.
    filled: usize,
    cursor: usize,
    bit_index: usize,
    /// Total bits handed out since the start (or the last restart).
    consumed: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader with a 64k buffer.
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            filled: 0,
            cursor: 0,
            bit_index: 0,
            consumed: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more.
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the cursor has walked off the valid bytes
        if self.cursor == self.filled {
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
            self.filled = size;
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return Some(true) if the next bit is 1, Some(false) if 0, or None at the end of the data.
    pub fn bool_bit(&mut self) -> io::Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit == 1))
    }

    /// Returns the next byte, or None if there is no more data to read. Calls read_bits(8).
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.read_bits(8)?.map(|byte| byte as u8))
    }

    /// Number of bits read so far.
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// Debugging function. Report the current position as bytes.bits.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.consumed / 8, self.consumed % 8)
    }

    /// Give back the underlying source. Buffered but unread bytes are lost.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bits(&mut self, n: usize) -> io::Result<Option<u32>> {
        debug_assert!((1..=32).contains(&n), "can't read {} bits at once", n);
        /*
        Take as many bits as possible from the current byte on each pass: first whatever is left
        of a partial byte, then whole bytes, then the leading bits of the last byte needed.
        */
        let mut result = 0_u32;
        let mut needed = n;
        while needed > 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            let available = 8 - self.bit_index;
            let take = needed.min(available);
            let bits = (u32::from(self.buffer[self.cursor]) >> (available - take)) & ((1 << take) - 1);
            result = result << take | bits;

            self.bit_index += take;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            self.consumed += take as u64;
            needed -= take;
        }
        Ok(Some(result))
    }
}

impl<R: Read + Seek> RewindableSource for BitReader<R> {
    fn restart(&mut self) -> io::Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        // Drop whatever was buffered so the next read goes back to the source
        self.filled = 0;
        self.cursor = 0;
        self.bit_index = 0;
        self.consumed = 0;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::BitReader;
    use crate::bitstream::{BitSource, RewindableSource};

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        let bits = (0..8)
            .map(|_| br.read_bits(1).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            bits,
            vec![Some(1), Some(0), Some(0), Some(0), Some(0), Some(0), Some(0), Some(1)]
        );
        assert_eq!(br.read_bits(1).unwrap(), None);
    }

    #[test]
    fn read_bits_test() {
        let x = [0b00011011_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(5).unwrap(), Some(3));
        assert_eq!(br.read_bits(1).unwrap(), Some(0));
        assert_eq!(br.read_bits(2).unwrap(), Some(3));
    }

    #[test]
    fn cross_byte_test() {
        let x = [0b1010_1100_u8, 0b0101_0011, 0xff].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(3).unwrap(), Some(0b101));
        assert_eq!(br.read_bits(9).unwrap(), Some(0b0_1100_0101));
        assert_eq!(br.read_bits(12).unwrap(), Some(0b0011_1111_1111));
        assert_eq!(br.read_bits(1).unwrap(), None);
    }

    #[test]
    fn word_test() {
        let x = [0xfa_u8, 0xce, 0x82, 0x00, 0x80].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(32).unwrap(), Some(0xface8200));
        assert_eq!(br.bool_bit().unwrap(), Some(true));
        assert_eq!(br.bool_bit().unwrap(), Some(false));
    }

    #[test]
    fn short_read_is_end_of_data_test() {
        let x = [0xab_u8, 0xcd].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(4).unwrap(), Some(0xa));
        assert_eq!(br.read_bits(16).unwrap(), None);
        assert_eq!(br.read_bits(1).unwrap(), None);
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.byte().unwrap(), Some(b'e'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..5 {
            br.byte().unwrap();
        }
        br.read_bits(1).unwrap();
        assert_eq!(br.loc(), "[5.1]");
        assert_eq!(br.position(), 41);
    }

    #[test]
    fn restart_test() {
        let mut br = BitReader::new(Cursor::new(b"ab".to_vec()));
        assert_eq!(br.byte().unwrap(), Some(b'a'));
        assert_eq!(br.read_bits(3).unwrap(), Some(0b011));
        br.restart().unwrap();
        assert_eq!(br.position(), 0);
        assert_eq!(br.byte().unwrap(), Some(b'a'));
        assert_eq!(br.byte().unwrap(), Some(b'b'));
        assert_eq!(br.byte().unwrap(), None);
        br.restart().unwrap();
        assert_eq!(br.byte().unwrap(), Some(b'a'));
    }

    #[test]
    fn large_input_test() {
        // Longer than one buffer, so the refill path runs
        let data = (0..200_000_u32).map(|i| (i % 251) as u8).collect::<Vec<u8>>();
        let mut br = BitReader::new(data.as_slice());
        for (i, &expected) in data.iter().enumerate() {
            assert_eq!(br.byte().unwrap(), Some(expected), "byte {}", i);
        }
        assert_eq!(br.byte().unwrap(), None);
    }
}
