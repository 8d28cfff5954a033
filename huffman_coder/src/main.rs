#![doc = include_str!("../README.md")]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dyn_size_of::GetSize;
use env_logger::Env;
use log::debug;

use huffman_tree::{Encoding, MergePolicy};

/// Name of the report file used when none is given.
const DEFAULT_REPORT: &str = "Encodings_and_SpaceSaving.txt";

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Merge {
    /// Merge the two front nodes of the once-sorted queue and append the result to its back
    Queue,
    /// Always merge the two least frequent nodes (minimum-redundancy code)
    Optimal
}

impl From<Merge> for MergePolicy {
    fn from(merge: Merge) -> Self {
        match merge {
            Merge::Queue => MergePolicy::Queue,
            Merge::Optimal => MergePolicy::Optimal
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Encodes the INPUT file with the Huffman code, writing one '0'/'1' character per bit to the OUTPUT file,
/// and writes the table of codes and the theoretical size reduction to the report file.
pub struct Conf {
    /// File to encode
    pub input: PathBuf,

    /// File to write the encoded bits to
    pub output: PathBuf,

    /// File to write the report to
    #[arg(short = 'r', long, default_value = DEFAULT_REPORT)]
    pub report: PathBuf,

    /// Order of merging the nodes of the Huffman tree
    #[arg(short = 'm', long, value_enum, default_value_t = Merge::Queue)]
    pub merge: Merge,

    /// Whether to print entropy, average code length and tree statistics
    #[arg(short = 's', long, default_value_t = false)]
    pub stats: bool,
}

impl Conf {
    fn run(&self) -> huffman_tree::Result<()> {
        let encoding = Encoding::from_file(&self.input, &self.output, self.merge.into())?;
        encoding.write_report(&self.report)?;
        if self.stats { print_stats(&encoding); }
        Ok(())
    }
}

fn print_stats(encoding: &Encoding) {
    println!("Different symbols: {}", encoding.frequencies.number_of_occurring_values());
    println!("Entropy [bits/symbol]: {:.4}", encoding.frequencies.entropy());
    match encoding.report.average_code_len() {
        Some(len) => println!("Average code length [bits/symbol]: {:.4}", len),
        None => println!("Average code length [bits/symbol]: undefined (empty input)")
    }
    println!("Longest code [bits]: {}", encoding.codes.max_len());
    println!("Tree depth: {}, leaves: {}", encoding.tree.depth(), encoding.tree.leaf_count());
    println!("Approximate tree size [bytes]: {}", encoding.tree.size_bytes());
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let conf: Conf = Conf::parse();
    match conf.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Run failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
