//! File-backed encode and decode sequences.
//!
//! Encoding writes two files: the tree (see [`crate::tree_codec`]) and the
//! encoded bit-string (see [`crate::bitstring`]). Decoding reads both back.
//!
//! The bit-string file drops leading `'0'` digits. Decoding restores them by
//! padding the loaded digits to [`HuffmanTree::encoded_len`], which the
//! persisted counts determine exactly. A loaded string longer than that, or
//! one that would need more zeros than [`HuffmanTree::max_leading_zeros`]
//! allows, is rejected before any padding is allocated.

use crate::bitstring::{self, BitString};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::message;
use crate::tree::HuffmanTree;
use crate::tree_codec;
use std::path::Path;

/// Result of [`encode_to_files`].
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The tree with codes assigned
    pub tree: HuffmanTree,
    /// The bit-string as produced by the encoder
    pub bits: BitString,
}

/// Result of [`decode_from_files`].
#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    /// The tree as read from the file (codes not assigned)
    pub tree: HuffmanTree,
    /// Leading `'0'` digits that had to be restored
    pub restored_zeros: usize,
}

/// Build a tree for `text`, encode it, and save the tree and bit-string.
///
/// Both values are computed before either file is created.
pub fn encode_to_files(
    text: &str,
    tree_path: impl AsRef<Path>,
    bits_path: impl AsRef<Path>,
) -> Result<Encoded> {
    let table = FrequencyTable::from_text(text);
    let mut tree = HuffmanTree::build(&table)?;
    tree.assign_codes();
    let bits = message::encode(&tree, text)?;

    tree_codec::save_tree(tree_path, &tree)?;
    bitstring::save_bits(bits_path, &bits)?;

    Ok(Encoded { tree, bits })
}

/// Load the tree and bit-string and decode the text.
///
/// # Errors
/// Returns `HuffmanError::AbsentTree` if the tree file holds no root node,
/// `BitLengthMismatch` or `TooManyLeadingZeros` if the bit-string cannot
/// have come from this tree, plus any error of the two loaders or the decoder.
pub fn decode_from_files(
    tree_path: impl AsRef<Path>,
    bits_path: impl AsRef<Path>,
) -> Result<Decoded> {
    let tree = tree_codec::load_tree(tree_path)?.ok_or(HuffmanError::AbsentTree)?;
    let loaded = bitstring::load_bits(bits_path)?;

    let expected = tree.encoded_len();
    let actual = loaded.len() as u64;
    if actual > expected {
        return Err(HuffmanError::BitLengthMismatch { expected, actual }.into());
    }
    let zeros = (expected - actual) + loaded.leading_zeros() as u64;
    let max = tree.max_leading_zeros();
    if zeros > max {
        return Err(HuffmanError::TooManyLeadingZeros { zeros, max }.into());
    }

    let bits = loaded.pad_to(usize::try_from(expected).unwrap_or(usize::MAX));
    let restored_zeros = bits.len() - loaded.len();
    if restored_zeros > 0 {
        log::debug!("restored {restored_zeros} leading zero bits");
    }

    let text = message::decode(&tree, &bits)?;
    Ok(Decoded {
        text,
        tree,
        restored_zeros,
    })
}
