//! huffcode: encode a text into a tree file and a bitstring file, then decode
//! it back from those files.

mod config;
mod input_gen;

use config::Config;
use huffcode_core::metrics::Metrics;
use huffcode_core::pipeline;
use std::fs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("Error: {}", e);
            println!("Run with --help for usage.");
            return;
        }
    };

    if config.print_config {
        config.print();
    }

    // Any failure ends the run; files already written are left in place
    if let Err(e) = run(&config) {
        println!("Error: {}", e);
    }
}

fn run(config: &Config) -> huffcode_core::Result<Metrics> {
    let mut metrics = Metrics::new();
    let text = config.text();

    println!("Text to encode: {}", text);
    metrics.input_chars = text.chars().count() as u64;
    metrics.input_bytes = text.len() as u64;

    let encoded = pipeline::encode_to_files(&text, &config.tree_file, &config.bits_file)?;
    metrics.distinct_symbols = encoded.tree.leaves().len() as u64;
    metrics.tree_nodes = encoded.tree.node_count() as u64;
    metrics.encoded_bits = encoded.bits.len() as u64;
    metrics.tree_file_bytes = fs::metadata(&config.tree_file)?.len();
    metrics.bits_file_bytes = fs::metadata(&config.bits_file)?.len();

    if config.print_tree {
        println!();
        print!("{}", encoded.tree);
    }

    println!();
    println!("Tree saved to {}", config.tree_file.display());
    println!("Encoded bitstring saved to {}", config.bits_file.display());
    println!();

    let decoded = pipeline::decode_from_files(&config.tree_file, &config.bits_file)?;
    println!("Tree loaded from {}", config.tree_file.display());
    println!("Encoded bitstring loaded from {}", config.bits_file.display());

    metrics.restored_zero_bits = decoded.restored_zeros as u64;
    metrics.decoded_chars = decoded.text.chars().count() as u64;
    metrics.verified = decoded.text == text;
    metrics.complete();

    println!();
    println!("Decoded text: {}", decoded.text);
    println!();

    if config.print_metrics {
        metrics.print_summary();
    }
    log::debug!("run metrics:\n{}", metrics.export_text());

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Input, SAMPLE_TEXT};

    fn config_in(dir: &tempfile::TempDir, input: Input) -> Config {
        Config {
            input,
            tree_file: dir.path().join("tree.bin"),
            bits_file: dir.path().join("big_number.bin"),
            print_metrics: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_demonstration_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, Input::Sample);

        let metrics = run(&config).unwrap();
        assert!(metrics.verified);
        assert_eq!(metrics.input_chars, SAMPLE_TEXT.chars().count() as u64);
        assert_eq!(metrics.decoded_chars, metrics.input_chars);
        assert_eq!(metrics.tree_nodes, 2 * metrics.distinct_symbols - 1);

        // Both files stay behind and decode again on their own
        let decoded = pipeline::decode_from_files(&config.tree_file, &config.bits_file).unwrap();
        assert_eq!(decoded.text, SAMPLE_TEXT);
        assert_eq!(
            metrics.tree_file_bytes,
            fs::metadata(&config.tree_file).unwrap().len()
        );
    }

    #[test]
    fn test_random_input_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, Input::Random { len: 300, seed: 7 });

        let metrics = run(&config).unwrap();
        assert!(metrics.verified);
        assert_eq!(metrics.decoded_chars, 300);
    }

    #[test]
    fn test_empty_text_fails_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, Input::Literal(String::new()));

        assert!(run(&config).is_err());
        assert!(!config.tree_file.exists());
        assert!(!config.bits_file.exists());
    }
}
