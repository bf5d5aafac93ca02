//! Sample text generation.
//!
//! When `--random` is given, we generate a text with skewed symbol
//! frequencies so the tree has both short and long codes.
//!
//! # Design
//!
//! Generated text has:
//! - Runs of a single repeated character (very frequent symbols)
//! - Word-like stretches over a small ASCII alphabet
//! - Cyrillic letters, which are multi-byte in UTF-8 but one symbol each

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ASCII_ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'h', 'k', 'l', 'n', 's', 'v', ' ', '.', ',',
];

const CYRILLIC_ALPHABET: &[char] = &['д', 'е', 'р', 'в', 'о', 'ж', 'ё', 'к'];

/// Generate a sample text of exactly `len` code points.
///
/// The same `seed` always produces the same text.
pub fn generate_sample_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(len);
    let mut remaining = len;

    while remaining > 0 {
        let run_len = remaining.min(rng.gen_range(1..=16));

        match rng.gen_range(0..10) {
            // 20% runs of one character
            0..=1 => {
                let symbol = pick(&mut rng, ASCII_ALPHABET);
                text.extend(std::iter::repeat(symbol).take(run_len));
            }

            // 50% ASCII word-like text
            2..=6 => {
                for _ in 0..run_len {
                    text.push(pick(&mut rng, ASCII_ALPHABET));
                }
            }

            // 30% Cyrillic
            _ => {
                for _ in 0..run_len {
                    text.push(pick(&mut rng, CYRILLIC_ALPHABET));
                }
            }
        }

        remaining -= run_len;
    }

    text
}

fn pick(rng: &mut ChaCha8Rng, alphabet: &[char]) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_text() {
        let text = generate_sample_text(42, 1000);
        assert_eq!(text.chars().count(), 1000);
    }

    #[test]
    fn test_determinism() {
        let text1 = generate_sample_text(12345, 5000);
        let text2 = generate_sample_text(12345, 5000);

        assert_eq!(text1, text2);
    }

    #[test]
    fn test_different_seeds() {
        let text1 = generate_sample_text(1, 1000);
        let text2 = generate_sample_text(2, 1000);

        assert_ne!(text1, text2);
    }

    #[test]
    fn test_various_sizes() {
        for len in [0, 1, 100, 1000, 10000] {
            let text = generate_sample_text(999, len);
            assert_eq!(text.chars().count(), len);
        }
    }

    #[test]
    fn test_uses_multibyte_symbols() {
        let text = generate_sample_text(7, 2000);
        assert!(text.len() > text.chars().count());
    }
}
