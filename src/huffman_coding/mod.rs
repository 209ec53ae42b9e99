//! The huffman module builds the code tree for huffpress and moves it in and out of the bitstream.
//!
//! A single tree covers the whole input. Its leaves are the byte values that occur in the data plus
//! one synthetic end-of-stream symbol, [`PSEUDO_EOF`], which terminates every non-empty payload so
//! the decoder knows where the real data stops and the byte padding begins.
//!
//! - node: the tree itself.
//! - tree_builder: repeated minimum-weight merging of a frequency table into a tree.
//! - code_table: the symbol to bit-string map, read off the tree.
//! - tree_codec: the preorder bit encoding of the tree that travels in the stream header.
//!

pub mod code_table;
pub mod node;
pub mod tree_builder;
pub mod tree_codec;

/// A symbol id: a byte value 0..=255, or the end-of-stream sentinel.
pub type Symbol = u16;

/// Bits in one input byte.
pub const BITS_PER_WORD: usize = 8;
/// Number of literal symbols.
pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;
/// The end-of-stream sentinel. One past the last byte value.
pub const PSEUDO_EOF: Symbol = ALPHABET_SIZE as Symbol;
/// Width of the symbol id field in a serialized leaf. Wide enough for 0..=256.
pub const SYMBOL_BITS: usize = 9;
