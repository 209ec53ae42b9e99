use std::io::{self, Write};

use log::trace;

use super::BitSink;

const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a bitstream for output. Bits collect in a 64 bit queue, full bytes move to an output
/// buffer, and the buffer goes to the writer whenever it fills up (or on flush).
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: usize,
    /// Count of bits written by the caller, not counting flush padding.
    written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Move all full bytes from the queue into the output buffer.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Hand the output buffer to the writer.
    fn drain_output(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.output.clear();
        Ok(())
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) -> io::Result<()> {
        self.write_bits(8, data as u32)
    }

    /// Bits written so far, not counting padding added by flush.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.written / 8, self.written % 8)
    }

    /// Give back the writer. Call flush() first or queued bits are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bits(&mut self, n: usize, value: u32) -> io::Result<()> {
        debug_assert!(n <= 32, "can't write {} bits at once", n);
        if n == 0 {
            return Ok(());
        }
        self.queue <<= n; //shift queue by bit length
        self.queue |= value as u64 & ((1_u64 << n) - 1); //add data portion to queue
        self.q_bits += n; //update depth of queue bits
        self.written += n as u64;
        self.push_queue();

        if self.output.len() >= BUFFER_SIZE {
            self.drain_output()?;
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits, then writes out the buffer.
    fn flush(&mut self) -> io::Result<()> {
        if self.q_bits > 0 {
            let pad = 8 - self.q_bits;
            trace!("Padding the last byte with {} zero bits", pad);
            self.queue <<= pad;
            self.q_bits += pad;
            self.push_queue();
        }
        self.drain_output()?;
        self.writer.flush()
    }
}
