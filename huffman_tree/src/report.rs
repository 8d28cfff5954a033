//! Human-readable table of codes and the comparison of sizes.

use std::fmt;

use crate::{Code, CodeBook, EncodingSummary, FrequencyTable};

/// Number of bits by which a single input symbol is represented in the comparison of sizes
/// (the width of a text code unit, not the width of a byte).
pub const INPUT_BITS_PER_SYMBOL: u64 = 16;

/// Line of the report that describes a single symbol.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SymbolEntry {
    pub symbol: u8,
    pub frequency: u64,
    /// Code of the symbol, `None` if no code could be assigned.
    pub code: Option<Code>
}

/// Report of the codes assigned to the symbols and of the (theoretical) size reduction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Report {
    /// Entries of the symbols of non-zero frequencies, in ascending order of symbols.
    pub entries: Vec<SymbolEntry>,
    /// Size of the input, [`INPUT_BITS_PER_SYMBOL`] bits per symbol.
    pub input_bits: u64,
    /// Number of bits (characters) written to the encoded output.
    pub output_bits: u64
}

impl Report {
    /// Constructs the report for the given `frequencies` of symbols, their codes, and the result of encoding.
    pub fn new(frequencies: &FrequencyTable, book: &CodeBook, summary: &EncodingSummary) -> Self {
        Self {
            entries: frequencies.occurring()
                .map(|(symbol, frequency)| SymbolEntry { symbol, frequency, code: book.get(symbol).copied() })
                .collect(),
            input_bits: summary.input_symbols * INPUT_BITS_PER_SYMBOL,
            output_bits: summary.output_bits
        }
    }

    /// Returns how many times the output (if it were packed into true binary) is smaller than the input,
    /// or `None` if the output is empty.
    pub fn ratio(&self) -> Option<f64> {
        (self.output_bits != 0).then(|| self.input_bits as f64 / self.output_bits as f64)
    }

    /// Returns whether no symbol has a code, i.e. the input contains fewer than two different symbols.
    pub fn no_code_assigned(&self) -> bool {
        self.entries.iter().all(|e| e.code.is_none())
    }

    /// Returns the average code length (in bits per input symbol) or `None` for empty input.
    pub fn average_code_len(&self) -> Option<f64> {
        let symbols = self.input_bits / INPUT_BITS_PER_SYMBOL;
        (symbols != 0).then(|| self.output_bits as f64 / symbols as f64)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            write!(f, "Letter: {} -> {} -> ", e.symbol as char, e.frequency)?;
            if let Some(code) = &e.code { write!(f, "{}", code)?; }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "The input file contained {} bits.", self.input_bits)?;
        writeln!(f, "The output file contained {} bits*.", self.output_bits)?;
        if self.no_code_assigned() {
            writeln!(f, "No code could be assigned, since the input contains fewer than two different symbols.")?;
        }
        match self.ratio() {
            Some(ratio) => writeln!(f, "The encoded output file is {:.4} times smaller than the original.", ratio)?,
            None => writeln!(f, "The encoded output file is empty, so the compression ratio is undefined.")?
        }
        writeln!(f, "* This would be the amount of bits the output file would be if it were represented in true binary.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Encoder, MergePolicy, Tree};

    fn report(text: &[u8]) -> Report {
        let frequencies = FrequencyTable::with_counted_all(text);
        let book = CodeBook::from_tree(&Tree::from_frequencies(&frequencies, MergePolicy::Queue));
        let summary = Encoder::new(&book).encode(text, std::io::sink()).unwrap();
        Report::new(&frequencies, &book, &summary)
    }

    #[test]
    fn aab() {
        let r = report(b"aab");
        assert_eq!(r.input_bits, 48);
        assert_eq!(r.output_bits, 3);
        assert_eq!(r.ratio(), Some(16.0));
        assert_eq!(r.average_code_len(), Some(1.0));
        assert!(!r.no_code_assigned());
        assert_eq!(r.to_string(), "\
Letter: a -> 2 -> 1
Letter: b -> 1 -> 0

The input file contained 48 bits.
The output file contained 3 bits*.
The encoded output file is 16.0000 times smaller than the original.
* This would be the amount of bits the output file would be if it were represented in true binary.
");
    }

    #[test]
    fn ratio_has_fixed_precision() {
        let r = report(b"abcdd");
        assert_eq!(r.ratio(), Some(8.0));
        let r = report(b"abc");
        // (a,b) merged first, then c with them: codes 10, 11, 0
        assert_eq!(r.output_bits, 5);
        assert!(r.to_string().contains("The encoded output file is 9.6000 times smaller than the original.\n"));
        let r = report(b"aaab");
        assert_eq!(r.output_bits, 4);
        assert_eq!(r.input_bits, 64);
        assert!(r.to_string().contains("is 16.0000 times"));
    }

    #[test]
    fn single_symbol() {
        let r = report(b"aaaa");
        assert_eq!(r.entries, [SymbolEntry { symbol: b'a', frequency: 4, code: None }]);
        assert_eq!(r.ratio(), None);
        assert!(r.no_code_assigned());
        assert_eq!(r.to_string(), concat!(
            "Letter: a -> 4 -> \n",
            "\n",
            "The input file contained 64 bits.\n",
            "The output file contained 0 bits*.\n",
            "No code could be assigned, since the input contains fewer than two different symbols.\n",
            "The encoded output file is empty, so the compression ratio is undefined.\n",
            "* This would be the amount of bits the output file would be if it were represented in true binary.\n"
        ));
    }

    #[test]
    fn empty_input() {
        let r = report(b"");
        assert!(r.entries.is_empty());
        assert_eq!(r.input_bits, 0);
        assert_eq!(r.output_bits, 0);
        assert_eq!(r.average_code_len(), None);
        assert!(r.no_code_assigned());
        assert!(r.to_string().starts_with("\nThe input file contained 0 bits.\n"));
        assert!(r.to_string().contains("compression ratio is undefined"));
    }

    #[test]
    fn symbols_are_printed_as_characters() {
        let r = report(b"\n\n ");
        let text = r.to_string();
        assert!(text.starts_with("Letter: \n -> 2 -> 1\nLetter:   -> 1 -> 0\n"));
    }
}
