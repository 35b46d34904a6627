//! Secret key handling and per-pixel channel selection.

use crate::bits::{text_to_bits, BitStream};
use crate::error::{Result, StegoError};
use image::Rgb;

/// A non-empty secret key together with its bit-stream.
///
/// The bit-stream is consumed cyclically, so the key never runs out.
#[derive(Debug, Clone)]
pub struct SecretKey {
    bits: BitStream,
}

impl SecretKey {
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(StegoError::MissingKey);
        }
        Ok(Self {
            bits: text_to_bits(key),
        })
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Key bit used for the pixel at `index` of the payload region.
    pub fn bit_at(&self, index: usize) -> u8 {
        self.bits[index % self.bits.len()]
    }
}

/// Picks the primary carrier channel of a payload pixel.
///
/// Returns the parity of the red channel XOR the key bit for `index`.
/// 1 puts the long stream in green, 0 puts it in blue. Red is never
/// written in the payload region, so decoding replays the same choice.
pub fn selector_bit(pixel: &Rgb<u8>, index: usize, key: &SecretKey) -> u8 {
    (pixel.0[0] & 1) ^ key.bit_at(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(SecretKey::new(""), Err(StegoError::MissingKey)));
    }

    #[test]
    fn key_bits_wrap() {
        let key = SecretKey::new("a").unwrap();
        // 'a' = 01100001
        assert_eq!(key.bits().len(), 8);
        assert_eq!(key.bit_at(1), 1);
        assert_eq!(key.bit_at(9), 1);
        assert_eq!(key.bit_at(8), 0);
        assert_eq!(key.bit_at(807), 1);
    }

    #[test]
    fn selector_follows_red_parity_and_key() {
        let key = SecretKey::new("a").unwrap();
        assert_eq!(selector_bit(&Rgb([10, 0, 0]), 0, &key), 0);
        assert_eq!(selector_bit(&Rgb([11, 0, 0]), 0, &key), 1);
        assert_eq!(selector_bit(&Rgb([10, 0, 0]), 1, &key), 1);
        assert_eq!(selector_bit(&Rgb([11, 0, 0]), 1, &key), 0);
    }

    #[test]
    fn selector_ignores_green_and_blue() {
        let key = SecretKey::new("Very Secure!").unwrap();
        for index in 0..200 {
            let a = selector_bit(&Rgb([77, 0, 0]), index, &key);
            let b = selector_bit(&Rgb([77, 255, 131]), index, &key);
            assert_eq!(a, b);
        }
    }
}
