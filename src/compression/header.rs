use log::{debug, error, info};

use crate::bitstream::{BitSink, BitSource};
use crate::error::{HuffError, Result, Section};
use crate::huffman_coding::node::Node;
use crate::huffman_coding::tree_builder::build_tree;
use crate::huffman_coding::tree_codec::{read_tree, write_tree};
use crate::huffman_coding::ALPHABET_SIZE;
use crate::tools::freq_count::FrequencyTable;

/// Width of the magic number and of each entry in a count header.
pub const BITS_PER_INT: usize = 32;
/// Magic number of a tree header. This is what the compressor writes by default.
pub const HUFF_NUMBER: u32 = 0xface8200;
/// Explicitly tagged tree header. Read as a tree header.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;
/// Magic number of a count header.
pub const HUFF_COUNTS: u32 = HUFF_NUMBER | 2;

/// How the code tree travels in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Header {
    /// Preorder tree bits: compact, one bit per internal node and ten per leaf.
    #[default]
    Tree,
    /// All 256 counts as 32 bit fields. The decoder rebuilds the tree from them.
    Counts,
}

impl Header {
    /// The magic number the compressor writes for this header.
    pub fn magic(&self) -> u32 {
        match self {
            Header::Tree => HUFF_NUMBER,
            Header::Counts => HUFF_COUNTS,
        }
    }

    /// The header kind for a magic number, if it is one of ours.
    pub fn from_magic(magic: u32) -> Option<Header> {
        match magic {
            HUFF_NUMBER | HUFF_TREE => Some(Header::Tree),
            HUFF_COUNTS => Some(Header::Counts),
            _ => None,
        }
    }
}

/// Write the magic number and the tree (or the counts it was built from).
pub fn write_header<S: BitSink>(
    header: Header,
    tree: &Node,
    freqs: &FrequencyTable,
    sink: &mut S,
) -> Result<()> {
    // Check the counts fit before anything goes on the stream
    if header == Header::Counts {
        if let Some((symbol, count)) = freqs.present().find(|&(_, count)| count > u32::MAX as u64) {
            return Err(HuffError::CountOverflow { symbol, count });
        }
    }

    debug!("Writing a {:?} header, magic {:#010x}.", header, header.magic());
    sink.write_bits(BITS_PER_INT, header.magic())?;
    match header {
        Header::Tree => write_tree(tree, sink)?,
        Header::Counts => {
            for &count in freqs.counts() {
                sink.write_bits(BITS_PER_INT, count as u32)?;
            }
        }
    }
    Ok(())
}

/// Read the magic number and the header after it, and return the code tree.
pub fn read_header<S: BitSource>(source: &mut S) -> Result<Node> {
    let magic = source
        .read_bits(BITS_PER_INT)?
        .ok_or_else(|| HuffError::truncated(Section::Magic))?;

    let header = match Header::from_magic(magic) {
        Some(header) => header,
        None => {
            error!("Fatal error: {:#010x} is not a huffpress magic number.", magic);
            return Err(HuffError::BadMagic { found: magic });
        }
    };
    info!("Found a valid huffpress signature ({:?} header).", header);

    match header {
        Header::Tree => read_tree(source),
        Header::Counts => {
            let mut counts = Vec::with_capacity(ALPHABET_SIZE);
            for _ in 0..ALPHABET_SIZE {
                let count = source
                    .read_bits(BITS_PER_INT)?
                    .ok_or_else(|| HuffError::truncated(Section::Header))?;
                counts.push(count as u64);
            }
            let tree = build_tree(&FrequencyTable::from_counts(&counts));
            if tree.is_leaf() {
                return Err(HuffError::BadTree("the count header is all zeros".to_string()));
            }
            Ok(tree)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{read_header, write_header, Header, HUFF_COUNTS, HUFF_NUMBER, HUFF_TREE};
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::bitstream::BitSink;
    use crate::error::{HuffError, Section};
    use crate::huffman_coding::tree_builder::build_tree;
    use crate::huffman_coding::tree_codec::write_tree;
    use crate::tools::freq_count::FrequencyTable;

    fn sample_freqs() -> FrequencyTable {
        let mut counts = vec![0_u64; 256];
        b"abracadabra".iter().for_each(|&b| counts[b as usize] += 1);
        FrequencyTable::from_counts(&counts)
    }

    #[test]
    fn magic_test() {
        assert_eq!(Header::Tree.magic(), 0xface8200);
        assert_eq!(Header::from_magic(HUFF_NUMBER), Some(Header::Tree));
        assert_eq!(Header::from_magic(HUFF_TREE), Some(Header::Tree));
        assert_eq!(Header::from_magic(HUFF_COUNTS), Some(Header::Counts));
        assert_eq!(Header::from_magic(0xface8203), None);
        assert_eq!(Header::default(), Header::Tree);
    }

    #[test]
    fn both_headers_test() {
        let freqs = sample_freqs();
        let tree = build_tree(&freqs);
        for header in [Header::Tree, Header::Counts] {
            let mut bw = BitWriter::new(Vec::<u8>::new());
            write_header(header, &tree, &freqs, &mut bw).unwrap();
            bw.flush().unwrap();
            let bytes = bw.into_inner();
            assert_eq!(&bytes[..4], &header.magic().to_be_bytes());
            let back = read_header(&mut BitReader::new(bytes.as_slice())).unwrap();
            assert_eq!(back.leaves(), tree.leaves(), "{:?}", header);
        }
    }

    #[test]
    fn count_header_size_test() {
        let freqs = sample_freqs();
        let tree = build_tree(&freqs);
        let mut bw = BitWriter::new(Vec::<u8>::new());
        write_header(Header::Counts, &tree, &freqs, &mut bw).unwrap();
        assert_eq!(bw.bits_written(), 32 + 256 * 32);
    }

    #[test]
    fn tagged_tree_header_test() {
        let freqs = sample_freqs();
        let tree = build_tree(&freqs);
        let mut bw = BitWriter::new(Vec::<u8>::new());
        bw.write_bits(32, HUFF_TREE).unwrap();
        write_tree(&tree, &mut bw).unwrap();
        bw.flush().unwrap();
        let bytes = bw.into_inner();
        let back = read_header(&mut BitReader::new(bytes.as_slice())).unwrap();
        assert_eq!(back.leaves(), tree.leaves());
    }

    #[test]
    fn bad_magic_test() {
        let bytes = [0xca_u8, 0xfe, 0xba, 0xbe, 0x00];
        let result = read_header(&mut BitReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(HuffError::BadMagic { found: 0xcafebabe })));
    }

    #[test]
    fn short_magic_test() {
        let bytes = [0xfa_u8, 0xce];
        let result = read_header(&mut BitReader::new(bytes.as_slice()));
        assert!(matches!(
            result,
            Err(HuffError::Truncated {
                section: Section::Magic
            })
        ));
    }

    #[test]
    fn zero_counts_test() {
        let mut bytes = HUFF_COUNTS.to_be_bytes().to_vec();
        bytes.extend(vec![0_u8; 256 * 4]);
        let result = read_header(&mut BitReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(HuffError::BadTree(_))));
    }

    #[test]
    fn count_overflow_test() {
        let mut counts = vec![0_u64; 256];
        counts[7] = u32::MAX as u64 + 1;
        let freqs = FrequencyTable::from_counts(&counts);
        let tree = build_tree(&freqs);
        let mut bw = BitWriter::new(Vec::<u8>::new());
        let result = write_header(Header::Counts, &tree, &freqs, &mut bw);
        assert!(matches!(result, Err(HuffError::CountOverflow { symbol: 7, .. })));
        assert_eq!(bw.bits_written(), 0);
    }
}
