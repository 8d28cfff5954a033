//! Encoding of the input with the codes from a [`CodeBook`].

use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use log::warn;

use crate::{CodeBook, Error, Result};

/// Numbers of symbols read and bits written by [`Encoder::encode`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct EncodingSummary {
    /// Number of symbols (bytes) read from the input.
    pub input_symbols: u64,
    /// Number of bits (`'0'`/`'1'` characters) written to the output.
    pub output_bits: u64
}

/// Writes codes of the input symbols as `'0'`/`'1'` characters, one character per bit.
pub struct Encoder {
    /// Codes rendered as characters, indexed by symbols.
    rendered: Box<[Option<Box<[u8]>>]>,
    /// Whether no symbol has a code, so every symbol is encoded with zero bits.
    degenerate: bool
}

impl Encoder {
    /// Constructs encoder that uses codes from `book`.
    pub fn new(book: &CodeBook) -> Self {
        Self {
            rendered: (0..=u8::MAX).map(|s| book.get(s).map(|c| c.to_ascii())).collect(),
            degenerate: book.is_empty()
        }
    }

    /// Reads `input` to its end and writes the codes of its symbols to `output`.
    ///
    /// If the code book is empty (the tree is degenerate), each symbol is encoded with zero bits.
    /// Otherwise, a symbol without a code results in [`Error::MissingCode`].
    pub fn encode<R: Read, W: Write>(&self, input: R, output: W) -> Result<EncodingSummary> {
        let mut input = BufReader::new(input);
        let mut output = BufWriter::new(output);
        let mut summary = EncodingSummary::default();
        if self.degenerate { warn!("No code is assigned, all symbols are encoded with zero bits"); }
        loop {
            let buffer = match input.fill_buf() {
                Ok(buffer) => buffer,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Read(e))
            };
            if buffer.is_empty() { break; }
            for symbol in buffer {
                summary.output_bits += self.write_symbol(*symbol, &mut output)?;
            }
            let consumed = buffer.len();
            summary.input_symbols += consumed as u64;
            input.consume(consumed);
        }
        output.flush().map_err(Error::Write)?;
        Ok(summary)
    }

    /// Writes the code of `symbol` to `output` and returns its length.
    fn write_symbol<W: Write>(&self, symbol: u8, output: &mut W) -> Result<u64> {
        match &self.rendered[symbol as usize] {
            Some(code) => {
                output.write_all(code).map_err(Error::Write)?;
                Ok(code.len() as u64)
            },
            None if self.degenerate => Ok(0),
            None => Err(Error::MissingCode { symbol })
        }
    }
}
