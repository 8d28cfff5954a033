//! Codewords and their assignment to symbols.

use std::fmt;
use dyn_size_of::GetSize;

use crate::{FrequencyTable, Node, Tree, ALPHABET_SIZE};

/// `Code` represents a binary codeword.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Code {
    /// Bits of the codeword. The lowest bit contains the last bit of the codeword.
    pub content: u128,
    /// Length of the codeword in bits.
    pub len: u32
}

impl Code {
    /// The largest number of bits that can be stored in the code.
    /// No Huffman tree for frequencies that sum up to at most `u64::MAX` is deeper.
    pub const CAPACITY: u32 = u128::BITS;

    /// Returns `self` extended by `bit` (`false` for the left child, `true` for the right one).
    #[inline] pub fn appended(&self, bit: bool) -> Self {
        debug_assert!(self.len < Self::CAPACITY);
        Self { content: (self.content << 1) | bit as u128, len: self.len + 1 }
    }

    /// Gets `bit_nr`-th bit, counting from the beginning of the codeword.
    #[inline] pub fn get(&self, bit_nr: u32) -> bool {
        (self.content >> (self.len - bit_nr - 1)) & 1 == 1
    }

    /// Returns iterator over the bits of `self`, from the first one.
    pub fn bits(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Returns the codeword as `'0'`/`'1'` characters.
    pub fn to_ascii(&self) -> Box<[u8]> {
        self.bits().map(|b| if b { b'1' } else { b'0' }).collect()
    }

    /// Returns whether `self` has no bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns whether `self` is a prefix of `other` (every code is its own prefix).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.content.checked_shr(other.len - self.len).unwrap_or(0) == self.content
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bits() { f.write_str(if b { "1" } else { "0" })?; }
        Ok(())
    }
}

/// Codes of all symbols, obtained by traversing the Huffman tree.
///
/// Symbols that are not leaves of the tree (or whose leaf is the root) have no code.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodeBook {
    codes: [Option<Code>; ALPHABET_SIZE]
}

impl GetSize for CodeBook {}

impl CodeBook {
    /// Assigns codes to the leaves of `tree`, going from the root,
    /// with `0` appended for each left and `1` for each right child.
    ///
    /// The childless root of a degenerate tree gets no code.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut result = Self { codes: [None; ALPHABET_SIZE] };
        if let Some((left, right)) = tree.root().children() {
            result.assign(left, Code::default().appended(false));
            result.assign(right, Code::default().appended(true));
        }
        result
    }

    fn assign(&mut self, node: &Node, code: Code) {
        match node {
            Node::Leaf { symbol, .. } => self.codes[*symbol as usize] = Some(code),
            Node::Internal { left, right, .. } => {
                self.assign(left, code.appended(false));
                self.assign(right, code.appended(true));
            }
        }
    }

    /// Returns the code of `symbol` or `None` if it has no code.
    #[inline] pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Returns iterator over `(symbol, code)` pairs of the symbols that have codes, in ascending order of symbols.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0..=u8::MAX).zip(self.codes.iter()).filter_map(|(s, c)| c.as_ref().map(|c| (s, c)))
    }

    /// Returns the number of symbols that have codes.
    pub fn len(&self) -> usize { self.codes.iter().flatten().count() }

    /// Returns whether no symbol has a code, which is the case for degenerate trees.
    pub fn is_empty(&self) -> bool { self.codes.iter().all(Option::is_none) }

    /// Returns the length of the longest code.
    pub fn max_len(&self) -> u32 {
        self.codes.iter().flatten().map(|c| c.len).max().unwrap_or(0)
    }

    /// Returns the total number of bits needed to encode the symbols counted in `frequencies`.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies.occurring()
            .map(|(s, f)| self.get(s).map_or(0, |c| c.len as u64 * f))
            .sum()
    }
}
