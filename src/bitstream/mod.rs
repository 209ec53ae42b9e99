//! The bitstream module forms the I/O subsystem for huffpress.
//!
//! Huffman codes have no byte alignment, so both sides of the codec talk to their input and output
//! through bit-addressed streams. Fields are packed most significant bit first.
//!
//! The compressor makes two full passes over its input (count, then encode), which is why the
//! source side is split in two: [`BitSource`] is all the decompressor needs, while the compressor
//! requires a [`RewindableSource`] that can be restarted from the beginning.
//!
pub mod bitreader;
pub mod bitwriter;

use std::io;

/// A readable sequence of bits.
pub trait BitSource {
    /// Read the next `n` bits (1..=32), most significant first.
    ///
    /// Returns `Ok(None)` when fewer than `n` bits remain. That is the end-of-data signal, and the
    /// bits that were left are consumed with it.
    fn read_bits(&mut self, n: usize) -> io::Result<Option<u32>>;
}

/// A bit source that can be read again from the start.
pub trait RewindableSource: BitSource {
    /// Rewind to the first bit of the input.
    fn restart(&mut self) -> io::Result<()>;
}

/// A writable sequence of bits.
pub trait BitSink {
    /// Write the low `n` bits (0..=32) of `value`, most significant first.
    fn write_bits(&mut self, n: usize, value: u32) -> io::Result<()>;

    /// Pad the last partial byte with zero bits and push everything to the underlying writer.
    fn flush(&mut self) -> io::Result<()>;
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_bits(&mut self, n: usize) -> io::Result<Option<u32>> {
        (**self).read_bits(n)
    }
}

impl<S: RewindableSource + ?Sized> RewindableSource for &mut S {
    fn restart(&mut self) -> io::Result<()> {
        (**self).restart()
    }
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_bits(&mut self, n: usize, value: u32) -> io::Result<()> {
        (**self).write_bits(n, value)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
