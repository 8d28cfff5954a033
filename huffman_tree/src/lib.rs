#![doc = include_str!("../README.md")]

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use dyn_size_of::GetSize;
use log::{debug, info, warn};
use tempfile::NamedTempFile;

mod error;
pub use error::{Error, Result};
mod frequencies;
pub use frequencies::{FrequencyTable, ALPHABET_SIZE};
mod node;
pub use node::Node;
mod tree;
pub use tree::{MergePolicy, Tree};
mod code;
pub use code::{Code, CodeBook};
mod encoder;
pub use encoder::{Encoder, EncodingSummary};
mod report;
pub use report::{Report, SymbolEntry, INPUT_BITS_PER_SYMBOL};

/// Everything produced by a single coding run.
pub struct Encoding {
    /// Numbers of occurrences of the symbols in the input.
    pub frequencies: FrequencyTable,
    /// Huffman tree built for `frequencies`.
    pub tree: Tree,
    /// Codes of the symbols, read from `tree`.
    pub codes: CodeBook,
    /// Report of the codes and of the size comparison.
    pub report: Report
}

impl Encoding {
    /// Counts the symbols of `frequency_pass`, builds the tree and codes for them,
    /// and encodes `encoding_pass` (which should expose the same data) to `output`.
    pub fn from_streams<F, E, W>(frequency_pass: F, encoding_pass: E, output: W, policy: MergePolicy) -> Result<Self>
        where F: Read, E: Read, W: Write
    {
        let frequencies = FrequencyTable::from_reader(frequency_pass).map_err(Error::Read)?;
        let (tree, codes) = build_codes(&frequencies, policy);
        Self::encode(frequencies, tree, codes, encoding_pass, output)
    }

    /// Encodes `input` to `output`, reading `input` twice.
    pub fn from_slice<W: Write>(input: &[u8], output: W, policy: MergePolicy) -> Result<Self> {
        Self::from_streams(input, input, output, policy)
    }

    /// Encodes the content of the `input` file to the `output` file.
    ///
    /// The input file is opened twice, once to count the symbols and once to encode them.
    /// The output is written to a temporary file in the directory of `output`,
    /// which replaces `output` only if the whole input was encoded successfully.
    pub fn from_file(input: &Path, output: &Path, policy: MergePolicy) -> Result<Self> {
        let frequencies = FrequencyTable::from_reader(open_input(input)?).map_err(Error::Read)?;
        let (tree, codes) = build_codes(&frequencies, policy);
        Self::encode_to_file(frequencies, tree, codes, open_input(input)?, output)
    }

    /// Encodes `input` to a temporary file that replaces `output` on success.
    /// On failure, the temporary file is removed and `output` is left untouched.
    fn encode_to_file<R: Read>(frequencies: FrequencyTable, tree: Tree, codes: CodeBook, input: R, output: &Path) -> Result<Self> {
        let create_error = |source| Error::CreateOutput { path: output.to_owned(), source };
        let directory = output.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let mut temporary = NamedTempFile::new_in(directory).map_err(create_error)?;
        let result = Self::encode(frequencies, tree, codes, input, &mut temporary)?;
        temporary.persist(output).map_err(|e| create_error(e.error))?;
        debug!("Encoded output written to {}", output.display());
        Ok(result)
    }

    fn encode<R: Read, W: Write>(frequencies: FrequencyTable, tree: Tree, codes: CodeBook, input: R, output: W) -> Result<Self> {
        let summary = Encoder::new(&codes).encode(input, output)?;
        let report = Report::new(&frequencies, &codes, &summary);
        info!("Encoded {} symbols with {} bits", summary.input_symbols, summary.output_bits);
        Ok(Self { frequencies, tree, codes, report })
    }

    /// Writes the report to the file at `path`.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        fs::write(path, self.report.to_string())
            .map_err(|source| Error::Report { path: path.to_owned(), source })
    }
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::MissingInput { path: path.to_owned(), source })
}

fn build_codes(frequencies: &FrequencyTable, policy: MergePolicy) -> (Tree, CodeBook) {
    debug!("Counted {} symbols, {} different, entropy {:.4} bits/symbol",
        frequencies.total(), frequencies.number_of_occurring_values(), frequencies.entropy());
    let tree = Tree::from_frequencies(frequencies, policy);
    debug!("Approximate tree size: {} bytes", tree.size_bytes());
    if tree.is_degenerate() {
        warn!("Input contains fewer than two different symbols, no code can be assigned");
    }
    let codes = CodeBook::from_tree(&tree);
    (tree, codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use std::collections::BTreeMap;
    use std::io::{self, ErrorKind, Read};
    use tempfile::tempdir;

    /// Reader that fails on every read.
    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn from_slice_aab() {
        let mut output = Vec::new();
        let e = Encoding::from_slice(b"aab", &mut output, MergePolicy::Queue).unwrap();
        assert_eq!(output, b"110");
        assert_eq!(e.frequencies.occurring().collect::<BTreeMap<_, _>>(), btreemap!(b'a' => 2, b'b' => 1));
        assert_eq!(e.tree.depth(), 1);
        assert_eq!(e.codes.len(), 2);
        assert_eq!(e.report.output_bits, 3);
    }

    #[test]
    fn from_file_and_write_report() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        let report = dir.path().join("report.txt");
        fs::write(&input, "abcdd").unwrap();
        let e = Encoding::from_file(&input, &output, MergePolicy::Queue).unwrap();
        e.write_report(&report).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "0001101111");
        let report = fs::read_to_string(&report).unwrap();
        assert!(report.starts_with("Letter: a -> 1 -> 00\nLetter: b -> 1 -> 01\nLetter: c -> 1 -> 10\nLetter: d -> 2 -> 11\n\n"));
        assert!(report.contains("The input file contained 80 bits.\nThe output file contained 10 bits*.\n"));
        assert!(report.contains("8.0000 times smaller"));
    }

    #[test]
    fn optimal_policy_from_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        fs::write(&input, "abbcccdddddddddd").unwrap();
        let e = Encoding::from_file(&input, &output, MergePolicy::Optimal).unwrap();
        assert_eq!(e.report.output_bits, 25);
        assert_eq!(fs::read_to_string(&output).unwrap().len(), 25);
    }

    #[test]
    fn missing_input() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.txt");
        let result = Encoding::from_file(&dir.path().join("missing.txt"), &output, MergePolicy::Queue);
        assert!(matches!(result, Err(Error::MissingInput { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn input_changed_between_passes() {
        let result = Encoding::from_streams(&b"ab"[..], &b"abc"[..], Vec::new(), MergePolicy::Queue);
        assert!(matches!(result, Err(Error::MissingCode { symbol: b'c' })));
    }

    #[test]
    fn read_error_in_encoding_pass() {
        let result = Encoding::from_streams(&b"ab"[..], (&b"ab"[..]).chain(Failing), Vec::new(), MergePolicy::Queue);
        assert!(matches!(result, Err(Error::Read(_))));
    }

    #[test]
    fn missing_input_leaves_previous_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.txt");
        fs::write(&output, "previous").unwrap();
        let result = Encoding::from_file(&dir.path().join("missing.txt"), &output, MergePolicy::Queue);
        assert!(matches!(result, Err(Error::MissingInput { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn failed_encoding_leaves_previous_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.txt");
        fs::write(&output, "previous").unwrap();
        let text = b"abracadabra".repeat(1000);
        let frequencies = FrequencyTable::with_counted_all(&text);
        let (tree, codes) = build_codes(&frequencies, MergePolicy::Queue);
        let input = (&text[..5000]).chain(Failing);
        let result = Encoding::encode_to_file(frequencies, tree, codes, input, &output);
        assert!(matches!(result, Err(Error::Read(_))));
        assert_eq!(fs::read(&output).unwrap(), b"previous");
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name().into_string().unwrap()).collect();
        assert_eq!(files, ["output.txt"]);
    }

    #[test]
    fn output_in_missing_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        fs::write(&input, "ab").unwrap();
        let result = Encoding::from_file(&input, &dir.path().join("no/such/dir/output.txt"), MergePolicy::Queue);
        assert!(matches!(result, Err(Error::CreateOutput { .. })));
    }

    #[test]
    fn empty_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        fs::write(&input, "").unwrap();
        let e = Encoding::from_file(&input, &output, MergePolicy::Queue).unwrap();
        assert!(e.tree.is_degenerate());
        assert!(e.tree.root().children().is_none());
        assert!(e.report.entries.is_empty());
        assert!(e.report.no_code_assigned());
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }
}
