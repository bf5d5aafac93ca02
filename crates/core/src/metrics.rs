//! Metrics collection and reporting for an encode/decode run.
//!
//! Tracks sizes at each stage (text, tree, bit-string, files) and timing, so
//! the demonstration can show what the tree and payload files cost relative
//! to the input.
//!
//! The `Metrics` struct is NOT thread-safe; runs are single-threaded and
//! update it explicitly after each stage.

use std::time::{Duration, Instant};

/// Counts, sizes and timing for one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Code points in the input text
    pub input_chars: u64,

    /// UTF-8 bytes of the input text
    pub input_bytes: u64,

    /// Distinct symbols (leaves)
    pub distinct_symbols: u64,

    /// Leaves plus internal nodes
    pub tree_nodes: u64,

    // === Encoding ===
    /// Length of the encoded bit-string
    pub encoded_bits: u64,

    /// Size of the tree file
    pub tree_file_bytes: u64,

    /// Size of the bit-string file (length prefix included)
    pub bits_file_bytes: u64,

    // === Decoding ===
    /// Leading zero bits restored after loading the bit-string
    pub restored_zero_bits: u64,

    /// Code points in the decoded text
    pub decoded_chars: u64,

    /// Whether the decoded text equals the input
    pub verified: bool,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_chars: 0,
            input_bytes: 0,
            distinct_symbols: 0,
            tree_nodes: 0,
            encoded_bits: 0,
            tree_file_bytes: 0,
            bits_file_bytes: 0,
            restored_zero_bits: 0,
            decoded_chars: 0,
            verified: false,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Both files together relative to the UTF-8 input.
    ///
    /// Returns 0.0 if there was no input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (self.tree_file_bytes + self.bits_file_bytes) as f64 / self.input_bytes as f64
        }
    }

    /// Payload file alone relative to the UTF-8 input.
    pub fn payload_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.bits_file_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_chars == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_chars as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Input ===");
        println!("Characters: {} ({} bytes UTF-8)", self.input_chars, self.input_bytes);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Tree nodes: {}", self.tree_nodes);
        println!();

        println!("=== Encoding ===");
        println!("Encoded bits: {} ({:.2} bits/symbol)", self.encoded_bits, self.bits_per_symbol());
        println!("Tree file: {} bytes", self.tree_file_bytes);
        println!("Bitstring file: {} bytes", self.bits_file_bytes);
        println!("Payload ratio: {:.1}%", self.payload_ratio() * 100.0);
        println!("Ratio with tree: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Decoding ===");
        println!("Restored leading zeros: {}", self.restored_zero_bits);
        println!("Decoded characters: {}", self.decoded_chars);
        if self.verified {
            println!("Verification: PASSED ✓");
        } else {
            println!("Verification: FAILED ✗");
        }
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_chars={}\n\
             input_bytes={}\n\
             distinct_symbols={}\n\
             tree_nodes={}\n\
             encoded_bits={}\n\
             tree_file_bytes={}\n\
             bits_file_bytes={}\n\
             compression_ratio={:.4}\n\
             restored_zero_bits={}\n\
             decoded_chars={}\n\
             verified={}\n",
            self.duration().as_millis(),
            self.input_chars,
            self.input_bytes,
            self.distinct_symbols,
            self.tree_nodes,
            self.encoded_bits,
            self.tree_file_bytes,
            self.bits_file_bytes,
            self.compression_ratio(),
            self.restored_zero_bits,
            self.decoded_chars,
            self.verified,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
