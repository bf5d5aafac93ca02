//! Encoded bit-strings and their big-integer file format.
//!
//! A [`BitString`] is text over `{'0', '1'}`. On disk it is stored as the
//! base-2 value of that text, in the minimal big-endian byte form of an
//! unsigned big integer:
//!
//! ```text
//! +------------------+
//! | length (4)       |  u32 little-endian, number of payload bytes
//! +------------------+
//! | payload          |  big-endian magnitude, no leading zero bytes
//! | (length bytes)   |  (empty for the value zero)
//! +------------------+
//! ```
//!
//! # Leading zeros
//!
//! The conversion is lossy: leading `'0'` digits have no numeric value and
//! are not stored. Reading `"00101"` back yields `"101"`, and an all-zero
//! string yields `"0"`. A reader that knows the intended length can restore
//! them with [`BitString::pad_to`].

use crate::error::{BitstringError, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// A validated string of binary digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    digits: String,
}

impl BitString {
    /// Validate that `digits` contains only `'0'` and `'1'`.
    ///
    /// # Errors
    /// Returns `BitstringError::InvalidDigit` for the first other character.
    pub fn parse(digits: &str) -> Result<Self> {
        if let Some((position, found)) = digits
            .chars()
            .enumerate()
            .find(|&(_, c)| c != '0' && c != '1')
        {
            return Err(BitstringError::InvalidDigit { position, found }.into());
        }
        Ok(Self {
            digits: digits.to_owned(),
        })
    }

    /// Wrap digits already known to be binary.
    pub(crate) fn from_binary_digits(digits: String) -> Self {
        debug_assert!(digits.bytes().all(|b| b == b'0' || b == b'1'));
        Self { digits }
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Bits from the last digit to the first, `true` for `'1'`.
    pub fn bits_rev(&self) -> impl Iterator<Item = bool> + '_ {
        self.digits.bytes().rev().map(|b| b == b'1')
    }

    /// Number of `'0'` digits before the first `'1'`.
    pub fn leading_zeros(&self) -> usize {
        self.digits.bytes().take_while(|&b| b == b'0').count()
    }

    /// Left-pad with `'0'` up to `len` digits. Longer strings are returned unchanged.
    pub fn pad_to(&self, len: usize) -> BitString {
        if self.len() >= len {
            return self.clone();
        }
        let mut digits = "0".repeat(len - self.len());
        digits.push_str(&self.digits);
        Self { digits }
    }

    /// Minimal big-endian bytes of the base-2 value.
    ///
    /// # Errors
    /// Returns `BitstringError::Empty` for an empty string, which has no value.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let value =
            BigUint::parse_bytes(self.digits.as_bytes(), 2).ok_or(BitstringError::Empty)?;
        if value.is_zero() {
            return Ok(Vec::new());
        }
        Ok(value.to_bytes_be())
    }

    /// Render big-endian magnitude bytes as base-2 digits without padding.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            digits: BigUint::from_bytes_be(bytes).to_str_radix(2),
        }
    }
}

impl FromStr for BitString {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Write the length-prefixed payload for `bits`.
pub fn write_bits<W: Write>(writer: &mut W, bits: &BitString) -> Result<()> {
    let payload = bits.to_bytes()?;
    let length =
        u32::try_from(payload.len()).map_err(|_| BitstringError::PayloadTooLarge(payload.len()))?;

    writer
        .write_all(&length.to_le_bytes())
        .map_err(BitstringError::WriteLength)?;
    writer
        .write_all(&payload)
        .map_err(BitstringError::WritePayload)?;
    Ok(())
}

/// Read a length-prefixed payload and render it as digits.
///
/// # Errors
/// Any short read (of the prefix or of the payload) is an error.
pub fn read_bits<R: Read>(reader: &mut R) -> Result<BitString> {
    let mut length_bytes = [0u8; 4];
    reader
        .read_exact(&mut length_bytes)
        .map_err(BitstringError::ReadLength)?;
    let length = u32::from_le_bytes(length_bytes);

    // Bounded read so a corrupt prefix cannot force a huge allocation
    let mut payload = Vec::new();
    reader
        .take(u64::from(length))
        .read_to_end(&mut payload)
        .map_err(|source| BitstringError::ReadPayload {
            expected: length,
            source,
        })?;
    if payload.len() != length as usize {
        return Err(BitstringError::ReadPayload {
            expected: length,
            source: std::io::ErrorKind::UnexpectedEof.into(),
        }
        .into());
    }

    Ok(BitString::from_bytes(&payload))
}

/// Save `bits` to a new file at `path`, replacing any existing file.
///
/// The digits are validated as a number before the file is created, so a
/// conversion failure leaves the file system untouched.
pub fn save_bits(path: impl AsRef<Path>, bits: &BitString) -> Result<()> {
    let path = path.as_ref();
    if bits.is_empty() {
        return Err(BitstringError::Empty.into());
    }

    let mut file = File::create(path).map_err(|source| BitstringError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_bits(&mut file, bits)?;

    log::info!("saved {} bits to {}", bits.len(), path.display());
    Ok(())
}

/// Load a bit-string saved by [`save_bits`]. Leading zeros are not restored.
pub fn load_bits(path: impl AsRef<Path>) -> Result<BitString> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| BitstringError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let bits = read_bits(&mut file)?;

    log::info!("loaded {} bits from {}", bits.len(), path.display());
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_parse_rejects_non_binary() {
        let result = BitString::parse("0102");
        assert!(matches!(
            result,
            Err(Error::Bitstring(BitstringError::InvalidDigit {
                position: 2,
                found: '2'
            }))
        ));
        assert!("1 0".parse::<BitString>().is_err());
    }

    #[test]
    fn test_to_bytes_is_minimal_big_endian() {
        let bits = BitString::parse("100000001").unwrap();
        assert_eq!(bits.to_bytes().unwrap(), vec![0x01, 0x01]);

        let bits = BitString::parse("11111111").unwrap();
        assert_eq!(bits.to_bytes().unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_zero_has_empty_payload() {
        let bits = BitString::parse("0000").unwrap();
        assert!(bits.to_bytes().unwrap().is_empty());
        assert_eq!(BitString::from_bytes(&[]).as_str(), "0");
    }

    #[test]
    fn test_empty_string_has_no_value() {
        let result = BitString::default().to_bytes();
        assert!(matches!(result, Err(Error::Bitstring(BitstringError::Empty))));
    }

    #[test]
    fn test_wire_format() {
        let bits = BitString::parse("1000000011").unwrap();
        let mut buf = Vec::new();
        write_bits(&mut buf, &bits).unwrap();
        assert_eq!(buf, vec![2, 0, 0, 0, 0x02, 0x03]);
    }

    #[test]
    fn test_round_trip_without_leading_zeros() {
        let bits = BitString::parse("1011001110001").unwrap();
        let mut buf = Vec::new();
        write_bits(&mut buf, &bits).unwrap();

        let read = read_bits(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, bits);
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        let bits = BitString::parse("000101").unwrap();
        assert_eq!(bits.leading_zeros(), 3);

        let mut buf = Vec::new();
        write_bits(&mut buf, &bits).unwrap();
        let read = read_bits(&mut Cursor::new(buf)).unwrap();

        assert_eq!(read.as_str(), "101");
        assert_eq!(read.pad_to(bits.len()), bits);
    }

    #[test]
    fn test_truncated_payload() {
        let mut buf = Vec::new();
        write_bits(&mut buf, &BitString::parse("1111111100000000").unwrap()).unwrap();
        buf.pop();

        let result = read_bits(&mut Cursor::new(buf));
        assert!(matches!(
            result,
            Err(Error::Bitstring(BitstringError::ReadPayload { expected: 2, .. }))
        ));
    }

    #[test]
    fn test_truncated_length() {
        let result = read_bits(&mut Cursor::new(vec![1, 0]));
        assert!(matches!(
            result,
            Err(Error::Bitstring(BitstringError::ReadLength(_)))
        ));
    }

    #[test]
    fn test_pad_to() {
        let bits = BitString::parse("11").unwrap();
        assert_eq!(bits.pad_to(5).as_str(), "00011");
        assert_eq!(bits.pad_to(1).as_str(), "11");
    }

    #[test]
    fn test_bits_rev() {
        let bits = BitString::parse("110").unwrap();
        let rev: Vec<bool> = bits.bits_rev().collect();
        assert_eq!(rev, vec![false, true, true]);
    }
}
