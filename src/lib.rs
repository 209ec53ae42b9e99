//! A Huffman coding byte-stream compressor.
//!
//! Version 0.1.0
//!
//! Each stream is compressed with one static Huffman code. The code is built from the byte counts
//! of the whole input plus an end-of-stream sentinel, so compression reads its input twice. The
//! code tree is written in front of the payload, which makes every compressed stream
//! self-describing.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpress test.txt`
//!
//! This will compress the file and create the file test.txt.hf.
//! The input file will be deleted unless -k is given.
//!
//! From code, `compress_bytes` and `decompress_bytes` work on buffers, while `compress` and
//! `decompress` work on any bit source and sink.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_with_header, CompressStats};
pub use compression::decompress::decompress;
pub use compression::header::Header;
pub use compression::{compress_bytes, compress_bytes_with_header, decompress_bytes};
pub use error::{HuffError, Result};
