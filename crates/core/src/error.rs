//! Error types for huffcode.
//!
//! All operations return structured errors rather than panicking.
//! File errors carry the path or the field being transferred so a failed run
//! can be diagnosed from the message alone.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Huffman: tree construction, encode or decode failures
/// - Tree codec: reading/writing the tree file
/// - Bitstring: parsing bit-strings and reading/writing the payload file
/// - I/O: file system operations outside the two codecs
#[derive(Debug, Error)]
pub enum Error {
    /// Huffman coding error (e.g., empty input, unknown symbol)
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Tree file error
    #[error("tree file error: {0}")]
    TreeCodec(#[from] TreeCodecError),

    /// Bitstring parse or file error
    #[error("bitstring error: {0}")]
    Bitstring(#[from] BitstringError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Huffman coding errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols at all (cannot build a tree)
    #[error("empty input: no symbols to build a tree from")]
    EmptyInput,

    /// Decoding was asked to walk a tree that does not exist
    #[error("no tree to decode with: the tree file holds no root node")]
    AbsentTree,

    /// A character of the message has no leaf in the tree
    #[error("symbol {symbol:?} has no code in the tree")]
    UnknownSymbol { symbol: char },

    /// The bit-string ended between the root and a leaf
    #[error("bit-string ends inside a code ({consumed} bits consumed)")]
    TruncatedCode { consumed: usize },

    /// The loaded bit-string is longer than the tree's counts allow
    #[error("bit-string has {actual} bits but the tree encodes {expected}")]
    BitLengthMismatch { expected: u64, actual: u64 },

    /// More leading zeros would have to be restored than the tree can produce
    #[error("{zeros} leading zero bits missing, at most {max} possible for this tree")]
    TooManyLeadingZeros { zeros: u64, max: u64 },
}

/// Which part of a persisted tree node an I/O operation was touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeField {
    PresenceFlag,
    Symbol,
    Count,
}

impl std::fmt::Display for NodeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeField::PresenceFlag => "presence flag",
            NodeField::Symbol => "symbol",
            NodeField::Count => "count",
        };
        f.write_str(name)
    }
}

/// Tree file errors.
#[derive(Debug, Error)]
pub enum TreeCodecError {
    /// The tree file could not be created
    #[error("failed to create {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },

    /// The tree file could not be opened
    #[error("failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Writing a node field failed
    #[error("failed to write node {field}: {source}")]
    Write { field: NodeField, source: io::Error },

    /// Reading a node field failed (including a stream cut mid-node)
    #[error("failed to read node {field}: {source}")]
    Read { field: NodeField, source: io::Error },

    /// The symbol field is not a Unicode scalar value
    #[error("invalid code point {0:#x} in tree file")]
    InvalidSymbol(i32),

    /// A count does not fit the signed 32-bit count field
    #[error("count {0} does not fit the i32 count field")]
    CountOverflow(u64),

    /// The count field is negative
    #[error("negative count {0} in tree file")]
    NegativeCount(i32),

    /// A node has exactly one child, which no Huffman tree contains
    #[error("node with count {count} has only one child")]
    SingleChild { count: i32 },

    /// An internal node's count differs from the sum of its children
    #[error("node count {count} differs from the sum {children} of its children")]
    CountMismatch { count: i32, children: u64 },

    /// Nesting goes deeper than any tree with i32 counts can
    #[error("tree nesting exceeds {max} levels")]
    TooDeep { max: usize },

    /// Flushing buffered output failed
    #[error("failed to flush tree file: {0}")]
    Flush(io::Error),
}

/// Bitstring parse and file errors.
#[derive(Debug, Error)]
pub enum BitstringError {
    /// A character other than '0' or '1'
    #[error("invalid binary digit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },

    /// An empty digit string has no numeric value
    #[error("empty bit-string cannot be converted to a number")]
    Empty,

    /// The payload file could not be created
    #[error("failed to create {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },

    /// The payload file could not be opened
    #[error("failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Writing the length prefix failed
    #[error("failed to write payload length: {0}")]
    WriteLength(io::Error),

    /// Writing the payload bytes failed
    #[error("failed to write payload bytes: {0}")]
    WritePayload(io::Error),

    /// Reading the length prefix failed
    #[error("failed to read payload length: {0}")]
    ReadLength(io::Error),

    /// Reading the payload bytes failed
    #[error("failed to read {expected} payload bytes: {source}")]
    ReadPayload { expected: u32, source: io::Error },

    /// The payload does not fit a u32 length prefix
    #[error("payload of {0} bytes exceeds the u32 length prefix")]
    PayloadTooLarge(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
