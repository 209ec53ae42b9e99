//! The preorder bit encoding of the code tree that makes up a tree header.
//!
//! A leaf is a 1 bit followed by its 9 bit symbol id. An internal node is a 0 bit followed by its
//! left subtree and then its right subtree. Weights are not stored; the decoder only needs the
//! shape and the leaf symbols. Rebuilt leaves get weight 1.
//!

use std::io;

use log::trace;

use super::node::{Node, NodeData};
use super::{PSEUDO_EOF, SYMBOL_BITS};
use crate::bitstream::{BitSink, BitSource};
use crate::error::{HuffError, Result, Section};

/// A tree with at most 257 leaves can't nest deeper than this.
const MAX_DEPTH: usize = PSEUDO_EOF as usize;

/// Write the tree in preorder.
pub fn write_tree<S: BitSink>(node: &Node, sink: &mut S) -> io::Result<()> {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            sink.write_bits(1, 0)?;
            write_tree(left, sink)?;
            write_tree(right, sink)
        }
        NodeData::Leaf(sym) => {
            sink.write_bits(1, 1)?;
            sink.write_bits(SYMBOL_BITS, *sym as u32)
        }
    }
}

/// Read a tree written by write_tree, rejecting anything the compressor could not have written.
pub fn read_tree<S: BitSource>(source: &mut S) -> Result<Node> {
    let root = read_node(source, 0)?;
    if root.is_leaf() {
        return Err(HuffError::BadTree("the root is a leaf".to_string()));
    }
    if !root.has_sentinel() {
        return Err(HuffError::BadTree("no end-of-stream leaf".to_string()));
    }
    trace!(
        "Read a code tree with {} leaves and depth {}.",
        root.internal_count() + 1,
        root.depth()
    );
    Ok(root)
}

fn read_node<S: BitSource>(source: &mut S, depth: usize) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(HuffError::BadTree(format!(
            "nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    match source.read_bits(1)? {
        None => Err(HuffError::truncated(Section::Header)),
        Some(0) => {
            let left = read_node(source, depth + 1)?;
            let right = read_node(source, depth + 1)?;
            Ok(Node::join(left, right))
        }
        Some(_) => {
            let sym = source
                .read_bits(SYMBOL_BITS)?
                .ok_or_else(|| HuffError::truncated(Section::Header))?;
            if sym > PSEUDO_EOF as u32 {
                return Err(HuffError::BadTree(format!("leaf symbol {} is out of range", sym)));
            }
            Ok(Node::leaf(sym as u16, 1))
        }
    }
}
