//! Tools to count frequencies of symbols.

use std::borrow::Borrow;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use dyn_size_of::GetSize;
use fsum::FSum;

use crate::Node;

/// Number of different symbols, i.e. all values of a byte.
pub const ALPHABET_SIZE: usize = 256;

/// Numbers of occurrences of all [`ALPHABET_SIZE`] symbols.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE]
}

impl Default for FrequencyTable {
    fn default() -> Self { Self { counts: [0; ALPHABET_SIZE] } }
}

impl GetSize for FrequencyTable {}

impl FrequencyTable {
    /// Constructs table with all frequencies equal to 0.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs table that counts occurrences of all bytes exposed by `iter`.
    pub fn with_counted_all<Iter>(iter: Iter) -> Self
        where Iter: IntoIterator, Iter::Item: Borrow<u8>
    {
        let mut result = Self::new();
        result.count_all(iter);
        result
    }

    /// Reads `input` to its end and counts occurrences of all its bytes.
    ///
    /// Interrupted reads are retried, any other I/O error is returned
    /// and the partially filled table is dropped.
    pub fn from_reader<R: Read>(input: R) -> io::Result<Self> {
        let mut result = Self::new();
        let mut input = BufReader::new(input);
        loop {
            let buffer = match input.fill_buf() {
                Ok(buffer) => buffer,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e)
            };
            if buffer.is_empty() { return Ok(result); }
            result.count_all(buffer);
            let consumed = buffer.len();
            input.consume(consumed);
        }
    }

    /// Adds one to the number of `unit` occurrences.
    /// Units that are not symbols of the alphabet (i.e. exceed 255) are ignored.
    #[inline] pub fn count<U: Into<u32>>(&mut self, unit: U) {
        let unit: u32 = unit.into();
        if let Some(frequency) = self.counts.get_mut(unit as usize) {
            *frequency += 1;
        }
    }

    /// Calls `count` for all bytes exposed by `iter`.
    pub fn count_all<Iter>(&mut self, iter: Iter)
        where Iter: IntoIterator, Iter::Item: Borrow<u8>
    {
        for b in iter { self.count(*b.borrow()); }
    }

    /// Returns the number of `symbol` occurrences.
    #[inline] pub fn get(&self, symbol: u8) -> u64 { self.counts[symbol as usize] }

    /// Returns the number of all symbols counted so far.
    pub fn total(&self) -> u64 { self.counts.iter().sum() }

    /// Returns the number of symbols that occurred at least once.
    pub fn number_of_occurring_values(&self) -> usize {
        self.counts.iter().filter(|f| **f != 0).count()
    }

    /// Returns iterator over `(symbol, frequency)` pairs of the symbols
    /// that occurred at least once, in ascending order of symbols.
    pub fn occurring(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX).zip(self.counts.iter().copied()).filter(|(_, f)| *f != 0)
    }

    /// Returns the Shannon entropy (in bits per symbol) of the symbols counted so far,
    /// or 0 if nothing was counted.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 { return 0.0; }
        let total = total as f64;
        - FSum::with_all(self.occurring()
            .map(|(_, f)| { let p = f as f64 / total; p * p.log2() })).value()
    }

    /// Returns one leaf for each symbol of the alphabet, in ascending order of symbols.
    pub fn leaves(&self) -> Vec<Node> {
        (0..=u8::MAX).zip(self.counts.iter()).map(|(s, f)| Node::leaf(s, *f)).collect()
    }

    /// Returns one leaf for each symbol of the alphabet, ordered by non-decreasing frequencies.
    /// Leaves with equal frequencies are ordered by their symbols.
    pub fn sorted_leaves(&self) -> Vec<Node> {
        let mut leaves = self.leaves();
        leaves.sort_by_key(Node::frequency);    // stable
        leaves
    }
}
