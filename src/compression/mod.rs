//! The compression module drives both directions of the codec.
//!
//! Compression happens in the following steps:
//! - Count how often each byte value occurs (first pass over the input).
//! - Build the code tree from those counts, with the end-of-stream sentinel added.
//! - Read each symbol's code off the tree.
//! - Write the 32 bit magic number and the header (the tree, or the counts).
//! - Encode every byte of the input (second pass) and finish with the sentinel's code.
//!
//! Decompression reads the magic number and the header to rebuild the same tree, then walks the
//! tree one bit at a time, writing a byte at each leaf until it reaches the sentinel.
//!
//! Each call owns its tree and its streams. Calls share nothing, so separate inputs can be
//! processed on separate threads.
//!

pub mod compress;
pub mod decompress;
pub mod header;

use std::io::Cursor;

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use header::Header;

/// Compress a buffer with a tree header. An empty buffer compresses to an empty buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    compress_bytes_with_header(data, Header::Tree)
}

/// Compress a buffer, choosing how the code tree is stored.
pub fn compress_bytes_with_header(data: &[u8], header: Header) -> Result<Vec<u8>> {
    let mut br = BitReader::new(Cursor::new(data));
    let mut bw = BitWriter::new(Vec::with_capacity(data.len() / 2));
    compress::compress_with_header(&mut br, &mut bw, header)?;
    Ok(bw.into_inner())
}

/// Decompress a buffer holding one compressed stream.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut br = BitReader::new(data);
    let mut bw = BitWriter::new(Vec::with_capacity(data.len() * 2));
    decompress::decompress(&mut br, &mut bw)?;
    Ok(bw.into_inner())
}
