//! Errors reported by the coding pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error that aborts a coding run.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file cannot be opened.
    #[error("cannot find input file {}: {source}", path.display())]
    MissingInput {
        /// Path of the input file.
        path: PathBuf,
        /// Cause reported by the operating system.
        #[source]
        source: io::Error
    },

    /// I/O error while scanning the input.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The encoded output (or its temporary file) cannot be created or persisted.
    #[error("cannot create output file {}: {source}", path.display())]
    CreateOutput {
        /// Path of the output file.
        path: PathBuf,
        /// Cause reported by the operating system.
        #[source]
        source: io::Error
    },

    /// I/O error while writing the encoded output.
    #[error("failed to write encoded output: {0}")]
    Write(#[source] io::Error),

    /// The report file cannot be written.
    #[error("cannot write report file {}: {source}", path.display())]
    Report {
        /// Path of the report file.
        path: PathBuf,
        /// Cause reported by the operating system.
        #[source]
        source: io::Error
    },

    /// A symbol read during encoding has no code, although the tree has codes for other symbols.
    /// It means that the input changed between the counting and the encoding pass.
    #[error("symbol {symbol} occurs in the input but has no assigned code")]
    MissingCode {
        /// The symbol without a code.
        symbol: u8
    },
}

/// Result type of the coding pipeline.
pub type Result<T> = std::result::Result<T, Error>;
