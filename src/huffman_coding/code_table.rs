//! Reads the code of every leaf off the code tree.
//!
//! A code is the path from the root to the leaf: 0 for each step left, 1 for each step right.
//! Codes end at leaves, so none of them is a prefix of another.
//!

use std::fmt::{Display, Formatter};
use std::io;

use log::trace;
use rustc_hash::FxHashMap;

use super::node::{Node, NodeData};
use super::Symbol;
use crate::bitstream::BitSink;

/// The bit string for one symbol, leading bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if this code is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() < other.len() && other.bits.starts_with(&self.bits)
    }

    /// Write the code onto the stream, up to 32 bits at a time.
    pub fn write_to<S: BitSink>(&self, sink: &mut S) -> io::Result<()> {
        for chunk in self.bits.chunks(32) {
            let value = chunk
                .iter()
                .fold(0_u32, |acc, &bit| acc << 1 | u32::from(bit));
            sink.write_bits(chunk.len(), value)?;
        }
        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.bits
            .iter()
            .try_for_each(|&bit| write!(f, "{}", if bit { '1' } else { '0' }))
    }
}

/// Symbol to code map for one tree. Symbols that are not leaves of the tree have no entry.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: FxHashMap<Symbol, Code>,
}

impl CodeTable {
    /// Walk the tree once and record the path to every leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut table = CodeTable::default();
        let mut path = Vec::new();
        table.record(root, &mut path);
        table
    }

    /// Recursive depth first walk. The path grows by one bit going down and loses it coming back.
    fn record(&mut self, node: &Node, path: &mut Vec<bool>) {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                path.push(false);
                self.record(left, path);
                path.pop();
                path.push(true);
                self.record(right, path);
                path.pop();
            }
            NodeData::Leaf(sym) => {
                let code = Code::new(path.clone());
                trace!("Symbol {:>3} gets code {}", sym, code);
                self.codes.insert(*sym, code);
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Code)> {
        self.codes.iter()
    }
}
