//! Builds the code tree from a frequency table.
//!
//! Every byte value that occurs becomes a leaf weighted by its count, and the sentinel is always
//! added with weight 1. The two lightest nodes are then merged until one node is left. The first
//! node taken from the queue becomes the left child.
//!
//! Ties between equal weights go to the node that entered the queue first. The sentinel is queued
//! first, then the byte values in ascending order, then merged nodes as they are made. A count
//! header relies on this: the decoder rebuilds the tree from the counts alone, so the same counts
//! must always give the same tree.
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::node::Node;
use super::{ALPHABET_SIZE, PSEUDO_EOF};
use crate::tools::freq_count::FrequencyTable;

/// A node waiting in the priority queue.
#[derive(Debug)]
struct Pending {
    weight: u64,
    order: usize,
    node: Node,
}

impl Pending {
    fn new(node: Node, order: usize) -> Self {
        Self {
            weight: node.weight,
            order,
            node,
        }
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// BinaryHeap pops the greatest element, so lighter and older nodes compare greater.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Build the code tree for a frequency table. The result always has at least two leaves because
/// the sentinel is added to whatever the input held.
pub fn build_tree(freqs: &FrequencyTable) -> Node {
    let mut heap = BinaryHeap::with_capacity(ALPHABET_SIZE + 1);
    heap.push(Pending::new(Node::leaf(PSEUDO_EOF, 1), 0));
    for (sym, count) in freqs.present() {
        let order = heap.len();
        heap.push(Pending::new(Node::leaf(sym, count), order));
    }
    let mut order = heap.len();
    let leaves = order;

    while let Some(left) = heap.pop() {
        let Some(right) = heap.pop() else {
            let root = left.node;
            debug!(
                "Built a code tree with {} leaves, total weight {} and depth {}.",
                leaves,
                root.weight,
                root.depth()
            );
            return root;
        };
        heap.push(Pending::new(Node::join(left.node, right.node), order));
        order += 1;
    }
    unreachable!("the sentinel leaf keeps the queue from running dry")
}
