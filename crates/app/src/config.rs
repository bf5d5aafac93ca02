//! Configuration for the huffcode demonstration.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then encodes the fixed sample
//! text into `tree.bin` and `big_number.bin` in the working directory and
//! decodes it back. Flags only swap the input or the file names.

use crate::input_gen;
use std::path::PathBuf;

/// Text encoded when no input flag is given.
pub const SAMPLE_TEXT: &str = "Helllhdfdfsvbdkjnvs.hdbv";

/// Where the text to encode comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The fixed sample text
    Sample,
    /// Text given on the command line
    Literal(String),
    /// Generated text of `len` code points
    Random { len: usize, seed: u64 },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    pub input: Input,

    // === Files ===
    /// Tree file path
    pub tree_file: PathBuf,

    /// Bit-string file path
    pub bits_file: PathBuf,

    // === Behavior ===
    /// Whether to print the tree after building it
    pub print_tree: bool,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: Input::Sample,
            tree_file: PathBuf::from("tree.bin"),
            bits_file: PathBuf::from("big_number.bin"),
            print_tree: false,
            print_config: false,
            print_metrics: true,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// With no arguments this is [`Config::default`]. `--random` without
    /// `--seed` uses a time-based seed, which `print` shows.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut config = Config::default();
        let mut text: Option<String> = None;
        let mut random_len: Option<usize> = None;
        let mut seed: Option<u64> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--text requires a value".to_string());
                    }
                    text = Some(args[i].clone());
                }
                "--random" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--random requires a length".to_string());
                    }
                    random_len = Some(args[i].parse().map_err(|_| "invalid random length")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--tree-file" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--tree-file requires a path".to_string());
                    }
                    config.tree_file = PathBuf::from(&args[i]);
                }
                "--bits-file" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--bits-file requires a path".to_string());
                    }
                    config.bits_file = PathBuf::from(&args[i]);
                }
                "--print-tree" => {
                    config.print_tree = true;
                }
                "--print-config" => {
                    config.print_config = true;
                }
                "--no-metrics" => {
                    config.print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        config.input = match (text, random_len) {
            (Some(_), Some(_)) => {
                return Err("--text and --random cannot be combined".to_string());
            }
            (Some(text), None) => Input::Literal(text),
            (None, Some(len)) => Input::Random {
                len,
                seed: seed.unwrap_or_else(time_seed),
            },
            (None, None) => {
                if seed.is_some() {
                    return Err("--seed only applies to --random".to_string());
                }
                Input::Sample
            }
        };

        if config.tree_file == config.bits_file {
            return Err("tree and bitstring files must differ".to_string());
        }

        Ok(config)
    }

    /// Resolve the text to encode.
    pub fn text(&self) -> String {
        match &self.input {
            Input::Sample => SAMPLE_TEXT.to_string(),
            Input::Literal(text) => text.clone(),
            Input::Random { len, seed } => input_gen::generate_sample_text(*seed, *len),
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input {
            Input::Sample => println!("Input: fixed sample"),
            Input::Literal(text) => {
                println!("Input: {} characters from --text", text.chars().count())
            }
            Input::Random { len, seed } => {
                println!("Input: {} random characters (seed {})", len, seed)
            }
        }
        println!("Tree file: {}", self.tree_file.display());
        println!("Bitstring file: {}", self.bits_file.display());
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn print_help() {
    println!("huffcode: Huffman coding with tree and bitstring files");
    println!();
    println!("USAGE:");
    println!("    huffcode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --text <TEXT>           Text to encode (default: fixed sample)");
    println!("    --random <N>            Encode N generated characters");
    println!("    --seed <N>              Seed for --random (default: time-based)");
    println!();
    println!("    --tree-file <PATH>      Tree file (default: tree.bin)");
    println!("    --bits-file <PATH>      Bitstring file (default: big_number.bin)");
    println!();
    println!("    --print-tree            Print the tree with its codes");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                 # Encode and decode the sample");
    println!("    huffcode --text 'abracadabra'            # Encode a given text");
    println!("    huffcode --random 10000 --seed 42        # Deterministic generated text");
    println!();
    println!("Set RUST_LOG=debug for step-by-step detail.");
}
