use std::io;

use log::info;

use crate::bitstream::BitSource;
use crate::huffman_coding::{Symbol, ALPHABET_SIZE, BITS_PER_WORD};

/// Occurrence count of every byte value in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// A table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Build a table from an explicit list of counts, symbol 0 first. Missing entries are zero.
    pub fn from_counts(counts: &[u64]) -> Self {
        let mut table = Self::new();
        table
            .counts
            .iter_mut()
            .zip(counts)
            .for_each(|(slot, &count)| *slot = count);
        table
    }

    /// Count for one byte value.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct byte values that occur.
    pub fn alphabet_size(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// (symbol, count) for every byte value that occurs, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(sym, &count)| (sym as Symbol, count))
    }

    /// All 256 counts, symbol 0 first.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a frequency count of every byte left in the source. The source is read to its end, so
/// it has to be restarted before anything else reads it.
pub fn count_frequencies<S: BitSource>(source: &mut S) -> io::Result<FrequencyTable> {
    let mut freqs = FrequencyTable::new();
    while let Some(byte) = source.read_bits(BITS_PER_WORD)? {
        freqs.counts[byte as usize] += 1;
    }
    info!(
        "Counted {} bytes using an alphabet of {} symbols.",
        freqs.total(),
        freqs.alphabet_size()
    );
    Ok(freqs)
}
