use std::io;

use log::{debug, info};

use super::header::{write_header, Header};
use crate::bitstream::{BitSink, RewindableSource};
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree_builder::build_tree;
use crate::huffman_coding::{Symbol, BITS_PER_WORD, PSEUDO_EOF};
use crate::tools::freq_count::count_frequencies;

/*
    Compression makes two full passes over the source. The first counts bytes so the code tree
    can be built; the second encodes them. Between the two the header goes out: the magic number
    and then the tree (or the counts). The payload ends with the sentinel's code, and the final
    byte is padded with zeros.
*/

/// What one compression call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressStats {
    /// Bytes read from the source.
    pub bytes_in: u64,
    /// Bits written to the sink, header included, padding excluded.
    pub bits_out: u64,
    /// Number of distinct byte values in the input.
    pub alphabet_size: usize,
}

/// Passes bits through to a sink and counts them.
struct Tally<'a, S> {
    sink: &'a mut S,
    bits: u64,
}

impl<'a, S: BitSink> BitSink for Tally<'a, S> {
    fn write_bits(&mut self, n: usize, value: u32) -> io::Result<()> {
        self.bits += n as u64;
        self.sink.write_bits(n, value)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Compress everything in the source using a tree header.
pub fn compress<R, W>(source: &mut R, sink: &mut W) -> Result<CompressStats>
where
    R: RewindableSource,
    W: BitSink,
{
    compress_with_header(source, sink, Header::Tree)
}

/// Compress everything in the source, choosing how the code tree is stored.
///
/// An empty source writes nothing at all, not even the magic number.
pub fn compress_with_header<R, W>(
    source: &mut R,
    sink: &mut W,
    header: Header,
) -> Result<CompressStats>
where
    R: RewindableSource,
    W: BitSink,
{
    // Peek at the first byte. No data means no output.
    if source.read_bits(BITS_PER_WORD)?.is_none() {
        info!("Input is empty. Nothing written.");
        return Ok(CompressStats::default());
    }
    source.restart()?;

    // First pass: count, then build the tree and read the codes off it
    let freqs = count_frequencies(source)?;
    let tree = build_tree(&freqs);
    let codes = CodeTable::from_tree(&tree);

    let mut out = Tally { sink, bits: 0 };
    write_header(header, &tree, &freqs, &mut out)?;
    let header_bits = out.bits;
    debug!("Header took {} bits.", header_bits);

    // Second pass: encode
    source.restart()?;
    let mut bytes_in = 0_u64;
    while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
        let code = codes.get(byte as Symbol).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("byte {} was not seen on the counting pass", byte),
            )
        })?;
        code.write_to(&mut out)?;
        bytes_in += 1;
    }
    if let Some(eof) = codes.get(PSEUDO_EOF) {
        eof.write_to(&mut out)?;
    }
    out.flush()?;

    let stats = CompressStats {
        bytes_in,
        bits_out: out.bits,
        alphabet_size: freqs.alphabet_size(),
    };
    info!(
        "Compressed {} bytes ({} symbols) into {} bits, {} of them header.",
        stats.bytes_in, stats.alphabet_size, stats.bits_out, header_bits
    );
    Ok(stats)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{compress, compress_with_header, CompressStats};
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::compression::header::Header;

    fn run(data: &[u8], header: Header) -> (CompressStats, Vec<u8>) {
        let mut br = BitReader::new(Cursor::new(data));
        let mut bw = BitWriter::new(Vec::<u8>::new());
        let stats = compress_with_header(&mut br, &mut bw, header).unwrap();
        (stats, bw.into_inner())
    }

    #[test]
    fn empty_test() {
        let mut br = BitReader::new(Cursor::new(Vec::<u8>::new()));
        let mut bw = BitWriter::new(Vec::<u8>::new());
        let stats = compress(&mut br, &mut bw).unwrap();
        assert_eq!(stats, CompressStats::default());
        assert!(bw.into_inner().is_empty());
    }

    #[test]
    fn single_symbol_test() {
        let (stats, out) = run(b"aaaa", Header::Tree);
        // magic + 21 bits of tree + 4 one bit codes + the sentinel's one bit code
        assert_eq!(stats.bytes_in, 4);
        assert_eq!(stats.alphabet_size, 1);
        assert_eq!(stats.bits_out, 32 + 21 + 5);
        assert_eq!(out.len(), 8);
        assert_eq!(&out[..4], &[0xfa, 0xce, 0x82, 0x00]);
    }

    #[test]
    fn layout_test() {
        // "aaaa": the sentinel is lighter, so it goes left (code 0) and 'a' right (code 1).
        // 0 | 1 100000000 | 1 001100001 | 1111 | 0, then six bits of padding
        let (_, out) = run(b"aaaa", Header::Tree);
        assert_eq!(&out[4..], &[0b0110_0000, 0b0001_0011, 0b0000_1111, 0b1000_0000]);
    }

    #[test]
    fn payload_size_test() {
        // a:4 b:2 c:1 d:1 plus the sentinel: 19 bits of codes
        let (stats, _) = run(b"abacabad", Header::Tree);
        let tree_bits = 4 + 10 * 5;
        assert_eq!(stats.bits_out, 32 + tree_bits + 19);
        assert_eq!(stats.alphabet_size, 4);
    }

    #[test]
    fn count_header_test() {
        let (stats, out) = run(b"abacabad", Header::Counts);
        assert_eq!(stats.bits_out, 32 + 256 * 32 + 19);
        assert_eq!(&out[..4], &[0xfa, 0xce, 0x82, 0x02]);
    }
}
