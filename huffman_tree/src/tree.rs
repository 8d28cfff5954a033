//! Construction of the Huffman tree.

use std::collections::VecDeque;
use dyn_size_of::GetSize;
use log::debug;

use crate::{FrequencyTable, Node};

/// Order in which the nodes of the working collection are merged.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum MergePolicy {
    /// The working collection is sorted once, then the two front nodes are merged
    /// and the result is appended to its back, without re-sorting.
    /// The resulting code is deterministic, but not necessarily optimal.
    #[default]
    Queue,
    /// The two nodes of the lowest frequencies are always merged (the two-queue method),
    /// which gives the minimum-redundancy code.
    Optimal
}

/// Huffman tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tree {
    root: Node
}

impl GetSize for Tree {
    fn size_bytes_dyn(&self) -> usize { self.root.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl Tree {
    /// Constructs the tree for the given `frequencies`, merging its leaves in the order given by `policy`.
    ///
    /// If no symbol occurs, the root is the childless leaf of the greatest symbol.
    pub fn from_frequencies(frequencies: &FrequencyTable, policy: MergePolicy) -> Self {
        let root = Self::merge(frequencies.sorted_leaves().into(), policy)
            .unwrap_or_else(|| Node::leaf(u8::MAX, 0));  // the table has a leaf per symbol
        Self::with_root(root, policy)
    }

    /// Constructs the tree from `leaves` ordered by non-decreasing frequencies.
    ///
    /// Leaves of frequency 0 found at the front of the working collection are discarded.
    /// If there are no leaves of non-zero frequencies, the last leaf becomes the (childless) root.
    /// Returns `None` only if `leaves` is empty.
    pub fn from_sorted(leaves: Vec<Node>, policy: MergePolicy) -> Option<Self> {
        Self::merge(leaves.into(), policy).map(|root| Self::with_root(root, policy))
    }

    fn with_root(root: Node, policy: MergePolicy) -> Self {
        debug!("Huffman tree ({:?} merge order) has {} leaves and depth {}",
            policy, root.leaf_count(), root.depth());
        Self { root }
    }

    fn merge(leaves: VecDeque<Node>, policy: MergePolicy) -> Option<Node> {
        match policy {
            MergePolicy::Queue => Self::merge_in_queue_order(leaves),
            MergePolicy::Optimal => Self::merge_optimally(leaves)
        }
    }

    /// Repeatedly merges the two front nodes of `queue` and appends the result to its back.
    /// The queue is never re-sorted, so the merged nodes do not have to be the least frequent.
    fn merge_in_queue_order(mut queue: VecDeque<Node>) -> Option<Node> {
        while queue.len() > 1 {
            let left = queue.pop_front()?;
            if left.frequency() == 0 { continue; }
            let right = queue.pop_front()?;
            queue.push_back(Node::merge(left, right));
        }
        queue.pop_front()
    }

    /// Merges nodes using the sorted queue of `leaves` and the queue of internal nodes
    /// (whose frequencies are non-decreasing as well), always taking the less frequent front.
    fn merge_optimally(mut leaves: VecDeque<Node>) -> Option<Node> {
        while leaves.len() > 1 && leaves.front().map_or(false, |n| n.frequency() == 0) {
            leaves.pop_front();
        }
        let mut internals = VecDeque::with_capacity(leaves.len());
        while leaves.len() + internals.len() > 1 {
            let left = Self::pop_less_frequent(&mut leaves, &mut internals)?;
            let right = Self::pop_less_frequent(&mut leaves, &mut internals)?;
            internals.push_back(Node::merge(left, right));
        }
        leaves.pop_front().or_else(|| internals.pop_front())
    }

    /// Pops the less frequent of the fronts of `leaves` and `internals`. Leaf is preferred on ties.
    fn pop_less_frequent(leaves: &mut VecDeque<Node>, internals: &mut VecDeque<Node>) -> Option<Node> {
        match (leaves.front(), internals.front()) {
            (Some(leaf), Some(internal)) if internal.frequency() < leaf.frequency() => internals.pop_front(),
            (Some(_), _) => leaves.pop_front(),
            (None, _) => internals.pop_front()
        }
    }

    /// Returns the root of the tree.
    #[inline] pub fn root(&self) -> &Node { &self.root }

    /// Returns the root of the tree, consuming `self`.
    #[inline] pub fn into_root(self) -> Node { self.root }

    /// Returns whether the root is a leaf, i.e. the input has fewer than two different symbols
    /// and no code can be assigned.
    #[inline] pub fn is_degenerate(&self) -> bool { self.root.is_leaf() }

    /// Returns the length of the longest code.
    #[inline] pub fn depth(&self) -> u32 { self.root.depth() }

    /// Returns the number of leaves.
    #[inline] pub fn leaf_count(&self) -> usize { self.root.leaf_count() }
}
