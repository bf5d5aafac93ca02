//! Message encoding and decoding against a Huffman tree.
//!
//! The encoder *prepends* each symbol's code, so the first digit of the
//! result belongs to the last symbol of the text. The decoder therefore walks
//! the bit-string from its last digit to its first.
//!
//! A tree whose root is a leaf has the empty code. The encoder writes a single
//! `'1'` per symbol for it, and the decoder emits the root symbol once per
//! bit without ever leaving the root.

use crate::bitstring::BitString;
use crate::error::{HuffmanError, Result};
use crate::tree::HuffmanTree;

/// Code written for each symbol of a single-symbol tree.
const LONE_LEAF_CODE: &str = "1";

/// Encode `text` with the codes assigned to `tree`.
///
/// # Errors
/// Returns `HuffmanError::UnknownSymbol` for a character with no leaf.
pub fn encode(tree: &HuffmanTree, text: &str) -> Result<BitString> {
    let table = tree.code_table();

    // Walking the text backwards and appending equals prepending front to back
    let mut digits = String::new();
    for symbol in text.chars().rev() {
        let code = table
            .get(&symbol)
            .copied()
            .ok_or(HuffmanError::UnknownSymbol { symbol })?;
        digits.push_str(if code.is_empty() { LONE_LEAF_CODE } else { code });
    }

    log::debug!(
        "encoded {} symbols into {} bits",
        text.chars().count(),
        digits.len()
    );
    Ok(BitString::from_binary_digits(digits))
}

/// Decode `bits` by walking `tree` from the root.
///
/// Bits are consumed from the last digit to the first. `'1'` follows the
/// one-branch, `'0'` the zero-branch; landing on a leaf emits its symbol and
/// returns to the root.
///
/// # Errors
/// Returns `HuffmanError::TruncatedCode` if the bits run out between the root
/// and a leaf.
pub fn decode(tree: &HuffmanTree, bits: &BitString) -> Result<String> {
    let root = tree.root();
    let mut cursor = root;
    let mut text = String::new();

    for bit in bits.bits_rev() {
        if let Some(next) = cursor.child(bit) {
            cursor = next;
        }
        if let Some(symbol) = cursor.symbol() {
            text.push(symbol);
            cursor = root;
        }
    }

    if !std::ptr::eq(cursor, root) {
        return Err(HuffmanError::TruncatedCode {
            consumed: bits.len(),
        }
        .into());
    }

    log::debug!("decoded {} bits into {} symbols", bits.len(), text.chars().count());
    Ok(text)
}
