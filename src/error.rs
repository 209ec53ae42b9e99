//! Error kinds shared by every part of the codec.
//!
//! All of them are terminal. Nothing in this crate retries a failed read or write.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffError>;

/// The part of a compressed stream being read when the data ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The leading 32-bit magic number.
    Magic,
    /// The preorder tree bits, or the 256 counts of a count header.
    Header,
    /// The variable-length codes before the sentinel.
    Payload,
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Magic => write!(f, "magic number"),
            Section::Header => write!(f, "stream header"),
            Section::Payload => write!(f, "payload"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HuffError {
    /// The stream does not start with a magic number this codec writes.
    #[error("not a huffpress stream (found magic number {found:#010x})")]
    BadMagic { found: u32 },

    /// End of data was reached before the sentinel code was decoded.
    #[error("compressed stream is truncated: ran out of data in the {section}")]
    Truncated { section: Section },

    /// The header describes a tree the compressor could never have produced.
    #[error("malformed code tree: {0}")]
    BadTree(String),

    /// A count header stores each count in 32 bits.
    #[error("symbol {symbol} occurs {count} times, too many for a count header")]
    CountOverflow { symbol: u16, count: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HuffError {
    pub(crate) fn truncated(section: Section) -> Self {
        HuffError::Truncated { section }
    }
}
