//! huffcode-core: Huffman coding of Unicode text with binary persistence
//!
//! This library provides the pieces of a small Huffman pipeline:
//! - Counts code-point frequencies in a text
//! - Builds a Huffman tree and assigns a bit-code to every symbol
//! - Encodes a text into a bit-string and decodes it back
//! - Saves and loads the tree and the bit-string as binary files
//!
//! # Architecture
//!
//! - `frequency`: Symbol counting
//! - `tree`: Tree nodes, greedy construction, code assignment
//! - `message`: Encoder and decoder
//! - `tree_codec`: Pre-order tree file format
//! - `bitstring`: Bit-strings and their big-integer file format
//! - `pipeline`: Encode-to-files and decode-from-files sequences
//! - `metrics`: Run statistics
//!
//! # Example
//! ```
//! use huffcode_core::{message, HuffmanTree};
//!
//! let text = "Helllhdfdfsvbdkjnvs.hdbv";
//! let tree = HuffmanTree::from_text(text).unwrap();
//! let bits = message::encode(&tree, text).unwrap();
//! assert_eq!(message::decode(&tree, &bits).unwrap(), text);
//! ```

pub mod bitstring;
pub mod error;
pub mod frequency;
pub mod message;
pub mod metrics;
pub mod pipeline;
pub mod tree;
pub mod tree_codec;

// Re-export commonly used types
pub use bitstring::BitString;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node};
