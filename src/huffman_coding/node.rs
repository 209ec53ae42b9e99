use super::{Symbol, PSEUDO_EOF};

/// Either two owned subtrees or a symbol. An internal node always has both children.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(Symbol),
}

/// A node of the code tree. Each subtree is owned by its parent; there are no back references.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Occurrence count for a leaf, sum of the children for an internal node. Trees rebuilt from a
    /// serialized header carry placeholder weights.
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf
    pub fn leaf(symbol: Symbol, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Create an internal node whose weight is the sum of its children
    pub fn join(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// The symbol of a leaf, None for an internal node.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }

    /// Step down the tree: bit 0 goes left, bit 1 goes right. None on a leaf.
    pub fn child(&self, bit: u32) -> Option<&Node> {
        match &self.node_data {
            NodeData::Kids(left, right) => Some(if bit == 0 { &**left } else { &**right }),
            NodeData::Leaf(_) => None,
        }
    }

    /// Symbols at the leaves, left to right.
    pub fn leaves(&self) -> Vec<Symbol> {
        let mut leaves = vec![];
        collect_leaves(self, &mut leaves);
        leaves
    }

    /// Count of internal nodes.
    pub fn internal_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.internal_count() + right.internal_count(),
            NodeData::Leaf(_) => 0,
        }
    }

    /// Length of the longest root to leaf path.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }

    /// True if a leaf holds the end-of-stream sentinel.
    pub fn has_sentinel(&self) -> bool {
        match &self.node_data {
            NodeData::Kids(left, right) => left.has_sentinel() || right.has_sentinel(),
            NodeData::Leaf(sym) => *sym == PSEUDO_EOF,
        }
    }
}

fn collect_leaves(node: &Node, leaves: &mut Vec<Symbol>) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            collect_leaves(left, leaves);
            collect_leaves(right, leaves);
        }
        NodeData::Leaf(sym) => leaves.push(*sym),
    }
}
