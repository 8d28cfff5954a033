//! Nodes of the Huffman tree.

use dyn_size_of::GetSize;

/// Node of the Huffman tree.
///
/// Each internal node exclusively owns its two children,
/// so the tree is built bottom-up and no node has two parents.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    /// Leaf that represents a single symbol.
    Leaf {
        /// The symbol.
        symbol: u8,
        /// Number of the symbol occurrences.
        frequency: u64
    },
    /// Internal node with two children.
    Internal {
        /// Sum of the children frequencies, calculated once, when the node is constructed.
        frequency: u64,
        /// Child reached by the `0` bit.
        left: Box<Node>,
        /// Child reached by the `1` bit.
        right: Box<Node>
    }
}

impl Node {
    /// Constructs a leaf for `symbol` that occurs `frequency` times.
    #[inline] pub fn leaf(symbol: u8, frequency: u64) -> Self {
        Self::Leaf { symbol, frequency }
    }

    /// Constructs an internal node that owns `left` and `right` children.
    pub fn merge(left: Node, right: Node) -> Self {
        Self::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }

    /// Returns the frequency of `self`.
    #[inline] pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency
        }
    }

    /// Returns the symbol of a leaf or `None` for an internal node.
    #[inline] pub fn symbol(&self) -> Option<u8> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Internal { .. } => None
        }
    }

    /// Returns the left and the right child of an internal node or `None` for a leaf.
    #[inline] pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some((&**left, &**right))
        }
    }

    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Self::Leaf { .. }) }

    /// Returns the length of the longest path from `self` to a leaf.
    pub fn depth(&self) -> u32 {
        self.children().map_or(0, |(l, r)| 1 + l.depth().max(r.depth()))
    }

    /// Returns the number of leaves in the subtree of `self`.
    pub fn leaf_count(&self) -> usize {
        self.children().map_or(1, |(l, r)| l.leaf_count() + r.leaf_count())
    }
}

impl GetSize for Node {
    fn size_bytes_dyn(&self) -> usize {
        self.children().map_or(0, |(l, r)| l.size_bytes() + r.size_bytes())
    }
    const USES_DYN_MEM: bool = true;
}
