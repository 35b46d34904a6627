//! Conversions between bytes, integers, pixels and bit-streams.
//!
//! A bit-stream is a `Vec<u8>` holding one bit per element (0 or 1), most
//! significant bit of every source byte first.

use crate::error::{Result, StegoError};
use image::{Rgb, RgbImage};

pub type BitStream = Vec<u8>;

/// Bits per pixel of a 3-channel image.
pub const BITS_PER_PIXEL: usize = 24;

/// Expands bytes into a bit-stream, 8 bits per byte, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> BitStream {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> (7 - i)) & 1))
        .collect()
}

fn pack_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}

/// Converts text to its bit-stream, 8 bits per byte of its UTF-8 encoding.
pub fn text_to_bits(text: &str) -> BitStream {
    bytes_to_bits(text.as_bytes())
}

/// Inverse of [`text_to_bits`].
///
/// Byte sequences that are not valid UTF-8 (a wrong key, usually) come back
/// with replacement characters instead of failing.
pub fn bits_to_text(bits: &[u8]) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::MalformedInput(format!(
            "text bit-stream of {} bits is not a whole number of bytes",
            bits.len()
        )));
    }
    Ok(String::from_utf8_lossy(&pack_bytes(bits)).into_owned())
}

/// Encodes `n` as exactly `width` bits, zero padded, MSB first.
pub fn int_to_bits(n: u64, width: usize) -> Result<BitStream> {
    if width < 64 && n >> width != 0 {
        return Err(StegoError::Overflow { value: n, width });
    }
    Ok((0..width)
        .rev()
        .map(|i| if i < 64 { ((n >> i) & 1) as u8 } else { 0 })
        .collect())
}

/// Decodes an MSB-first bit-stream into an integer.
///
/// The stream must be byte aligned even though the result is a plain integer.
pub fn bits_to_int(bits: &[u8]) -> Result<u64> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::MalformedInput(format!(
            "integer bit-stream of {} bits is not byte aligned",
            bits.len()
        )));
    }
    bits.iter().try_fold(0u64, |value, &bit| {
        if value >> 63 != 0 {
            return Err(StegoError::Overflow {
                value,
                width: 64,
            });
        }
        Ok((value << 1) | u64::from(bit & 1))
    })
}

/// Flattens a pixel grid into 24 bits per pixel (R, G, B), row-major.
pub fn pixels_to_bits(grid: &RgbImage) -> BitStream {
    bytes_to_bits(grid.as_raw())
}

/// Inverse of [`pixels_to_bits`], without the grid's dimensions.
pub fn bits_to_pixels(bits: &[u8]) -> Result<Vec<Rgb<u8>>> {
    if bits.len() % BITS_PER_PIXEL != 0 {
        return Err(StegoError::MalformedInput(format!(
            "image bit-stream of {} bits is not a whole number of pixels",
            bits.len()
        )));
    }
    Ok(pack_bytes(bits)
        .chunks_exact(3)
        .map(|c| Rgb([c[0], c[1], c[2]]))
        .collect())
}

/// Rebuilds a `width` x `height` grid from a bit-stream.
pub fn bits_to_image(bits: &[u8], width: u32, height: u32) -> Result<RgbImage> {
    let pixels = bits_to_pixels(bits)?;
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(StegoError::DimensionMismatch(format!(
            "{} pixels recovered for a {}x{} image",
            pixels.len(),
            width,
            height
        )));
    }
    let raw = pixels.into_iter().flat_map(|px| px.0).collect();
    RgbImage::from_raw(width, height, raw).ok_or_else(|| {
        StegoError::DimensionMismatch(format!("cannot build a {}x{} image", width, height))
    })
}

/// Sets the least significant bit of `value` to `bit`.
pub fn replace_lsb(value: u8, bit: u8) -> u8 {
    (value & 0xFE) | (bit & 1)
}

#[cfg(test)]
pub(crate) fn parse_bits(s: &str) -> BitStream {
    s.bytes().map(|c| c - b'0').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID_BITS: &str =
        "111111111111110111111100110010001001110010101000100001100001110000100001";

    fn sample_grid() -> RgbImage {
        RgbImage::from_raw(3, 1, vec![255, 253, 252, 200, 156, 168, 134, 28, 33]).unwrap()
    }

    #[test]
    fn text_to_bits_vector() {
        assert_eq!(
            text_to_bits("abcd"),
            parse_bits("01100001011000100110001101100100")
        );
    }

    #[test]
    fn bits_to_text_vector() {
        let bits = parse_bits("01100001011000100110001101100100");
        assert_eq!(bits_to_text(&bits).unwrap(), "abcd");
    }

    #[test]
    fn bits_to_text_rejects_partial_byte() {
        let bits = parse_bits("0110000");
        assert!(matches!(
            bits_to_text(&bits),
            Err(StegoError::MalformedInput(_))
        ));
    }

    #[test]
    fn text_inverse_on_printable_ascii() {
        let all: String = (0x20u8..0x7f).map(char::from).collect();
        assert_eq!(bits_to_text(&text_to_bits(&all)).unwrap(), all);
        assert_eq!(bits_to_text(&text_to_bits("")).unwrap(), "");
    }

    #[test]
    fn int_bits_vectors() {
        assert_eq!(int_to_bits(123, 8).unwrap(), parse_bits("01111011"));
        assert_eq!(bits_to_int(&parse_bits("01111011")).unwrap(), 123);
        assert_eq!(int_to_bits(5, 4).unwrap(), parse_bits("0101"));
        assert_eq!(int_to_bits(0, 0).unwrap(), BitStream::new());
    }

    #[test]
    fn int_to_bits_overflow() {
        assert!(matches!(
            int_to_bits(16, 4),
            Err(StegoError::Overflow { value: 16, width: 4 })
        ));
        assert!(int_to_bits(15, 4).is_ok());
    }

    #[test]
    fn bits_to_int_requires_byte_alignment() {
        assert!(matches!(
            bits_to_int(&parse_bits("101")),
            Err(StegoError::MalformedInput(_))
        ));
    }

    #[test]
    fn pixels_to_bits_vector() {
        assert_eq!(pixels_to_bits(&sample_grid()), parse_bits(GRID_BITS));
    }

    #[test]
    fn bits_to_pixels_vector() {
        let pixels = bits_to_pixels(&parse_bits(GRID_BITS)).unwrap();
        assert_eq!(
            pixels,
            vec![Rgb([255, 253, 252]), Rgb([200, 156, 168]), Rgb([134, 28, 33])]
        );
        assert_eq!(bits_to_image(&parse_bits(GRID_BITS), 3, 1).unwrap(), sample_grid());
    }

    #[test]
    fn bits_to_pixels_rejects_partial_pixel() {
        let bits = parse_bits(&GRID_BITS[..64]);
        assert!(matches!(
            bits_to_pixels(&bits),
            Err(StegoError::MalformedInput(_))
        ));
    }

    #[test]
    fn bits_to_image_checks_dimensions() {
        assert!(matches!(
            bits_to_image(&parse_bits(GRID_BITS), 2, 2),
            Err(StegoError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn replace_lsb_vectors() {
        assert_eq!(replace_lsb(64, 1), 65);
        assert_eq!(replace_lsb(127, 0), 126);
        assert_eq!(replace_lsb(65, 1), 65);
        assert_eq!(replace_lsb(0, 0), 0);
    }
}
