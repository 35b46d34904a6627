//! Size header stored in the first `L` pixels of the cover.
//!
//! Pixel `i` of the header region carries bit `i` (MSB first) of the text
//! length in its red LSB, of the hidden image width in green and of the
//! hidden image height in blue. `L` is never stored: both sides derive it
//! from the cover's pixel count as `ceil(log2(pixels / 8))`.

use crate::bits::{int_to_bits, replace_lsb};
use crate::error::{Result, StegoError};
use image::Rgb;

/// Payload sizes recorded ahead of the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Hidden text length in bytes.
    pub text_len: u32,
    /// Hidden image width in pixels.
    pub img_width: u32,
    /// Hidden image height in pixels.
    pub img_height: u32,
}

impl Header {
    pub fn text_bits(&self) -> usize {
        self.text_len as usize * 8
    }

    pub fn image_bits(&self) -> usize {
        (self.img_width as usize)
            .saturating_mul(self.img_height as usize)
            .saturating_mul(crate::bits::BITS_PER_PIXEL)
    }
}

/// Header width `L` for a cover of `total_pixels` pixels.
pub fn header_len(total_pixels: usize) -> Result<usize> {
    let groups = total_pixels / 8;
    if groups == 0 {
        return Err(StegoError::CoverTooSmall {
            pixels: total_pixels,
        });
    }
    // ceil(log2(groups)), exact in integers
    Ok((usize::BITS - (groups - 1).leading_zeros()) as usize)
}

/// Rewrites the first `header_len` pixels of `cover` to carry `header`.
///
/// Returns the rewritten header pixels; `cover` is left untouched.
pub fn encode_header(cover: &[Rgb<u8>], header_len: usize, header: &Header) -> Result<Vec<Rgb<u8>>> {
    if cover.len() < header_len {
        return Err(StegoError::CoverTooSmall {
            pixels: cover.len(),
        });
    }
    let text_bits = int_to_bits(u64::from(header.text_len), header_len)?;
    let width_bits = int_to_bits(u64::from(header.img_width), header_len)?;
    let height_bits = int_to_bits(u64::from(header.img_height), header_len)?;

    Ok(cover[..header_len]
        .iter()
        .enumerate()
        .map(|(i, px)| {
            let Rgb([r, g, b]) = *px;
            Rgb([
                replace_lsb(r, text_bits[i]),
                replace_lsb(g, width_bits[i]),
                replace_lsb(b, height_bits[i]),
            ])
        })
        .collect())
}

/// Reads the header back from the first `header_len` pixels.
pub fn decode_header(cover: &[Rgb<u8>], header_len: usize) -> Result<Header> {
    if cover.len() < header_len || header_len > 32 {
        return Err(StegoError::MalformedInput(format!(
            "cannot read a {}-bit header from {} pixels",
            header_len,
            cover.len()
        )));
    }
    let mut header = Header::default();
    for px in &cover[..header_len] {
        let Rgb([r, g, b]) = *px;
        header.text_len = 2 * header.text_len + u32::from(r & 1);
        header.img_width = 2 * header.img_width + u32::from(g & 1);
        header.img_height = 2 * header.img_height + u32::from(b & 1);
    }
    Ok(header)
}
