//! Encode and decode entry points over in-memory pixel grids.
//!
//! Encoding writes the size header into the first `L` pixels, then
//! interleaves the image and text bit-streams into the pixels that follow.
//! The longer of the two streams is the long stream; the image wins ties.

use crate::bits::{bits_to_image, bits_to_text, pixels_to_bits, text_to_bits, BitStream, BITS_PER_PIXEL};
use crate::error::{PayloadKind, Result, StegoError};
use crate::header::{decode_header, encode_header, header_len, Header};
use crate::lsb;
use crate::selector::SecretKey;
use image::{Rgb, RgbImage};
use log::{debug, info};

/// How much a cover of a given size can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Header width `L` in pixels (and bits per header field).
    pub header_len: usize,
    /// Pixels left for the payload, one long-stream bit each.
    pub payload_pixels: usize,
    pub max_text_chars: usize,
    pub max_image_pixels: usize,
}

pub fn capacity(total_pixels: usize) -> Result<Capacity> {
    let header_len = header_len(total_pixels)?;
    let payload_pixels = total_pixels - header_len;
    Ok(Capacity {
        header_len,
        payload_pixels,
        max_text_chars: payload_pixels / 8,
        max_image_pixels: payload_pixels / BITS_PER_PIXEL,
    })
}

/// Payloads recovered from an encoded image.
#[derive(Debug, Default)]
pub struct Extracted {
    pub image: Option<RgbImage>,
    pub text: Option<String>,
}

fn to_u32(value: usize, width: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| StegoError::Overflow {
        value: value as u64,
        width,
    })
}

/// Hides `image` and/or `text` in a copy of `cover`.
pub fn encode(
    cover: &RgbImage,
    image: Option<&RgbImage>,
    text: Option<&str>,
    key: &str,
) -> Result<RgbImage> {
    let key = SecretKey::new(key)?;
    let image = image.filter(|img| img.width() > 0 && img.height() > 0);
    let text = text.filter(|t| !t.is_empty());
    if image.is_none() && text.is_none() {
        return Err(StegoError::NothingToHide);
    }

    let pixels: Vec<Rgb<u8>> = cover.pixels().copied().collect();
    let cap = capacity(pixels.len())?;

    let text_bits = text.map(text_to_bits).unwrap_or_default();
    if text_bits.len() > cap.payload_pixels {
        return Err(StegoError::PayloadTooLarge {
            kind: PayloadKind::Text,
            needed: text_bits.len(),
            capacity: cap.payload_pixels,
        });
    }
    let image_bits = image.map(pixels_to_bits).unwrap_or_default();
    if image_bits.len() > cap.payload_pixels {
        return Err(StegoError::PayloadTooLarge {
            kind: PayloadKind::Image,
            needed: image_bits.len(),
            capacity: cap.payload_pixels,
        });
    }

    let header = Header {
        text_len: to_u32(text.map_or(0, str::len), cap.header_len)?,
        img_width: image.map_or(0, |img| img.width()),
        img_height: image.map_or(0, |img| img.height()),
    };
    info!(
        "Hiding {} text bits and {} image bits ({}x{}) behind a {}-pixel header",
        text_bits.len(),
        image_bits.len(),
        header.img_width,
        header.img_height,
        cap.header_len
    );

    let image_is_long = image_bits.len() >= text_bits.len();
    let (long, short) = if image_is_long {
        (&image_bits, &text_bits)
    } else {
        (&text_bits, &image_bits)
    };
    debug!(
        "Long stream is the {} ({} bits), short stream {} bits",
        if image_is_long { "image" } else { "text" },
        long.len(),
        short.len()
    );

    let head = encode_header(&pixels, cap.header_len, &header)?;
    let payload_start = cap.header_len;
    let payload_end = payload_start + long.len();
    let body = lsb::embed(&pixels[payload_start..], long, short, &key)?;

    let raw: Vec<u8> = head
        .iter()
        .chain(body.iter())
        .chain(pixels[payload_end..].iter())
        .flat_map(|px| px.0)
        .collect();
    RgbImage::from_raw(cover.width(), cover.height(), raw).ok_or_else(|| {
        StegoError::DimensionMismatch("encoded pixels do not fill the cover".to_string())
    })
}

/// Recovers the payloads hidden in `encoded` with `key`.
pub fn decode(encoded: &RgbImage, key: &str) -> Result<Extracted> {
    let key = SecretKey::new(key)?;
    let pixels: Vec<Rgb<u8>> = encoded.pixels().copied().collect();
    let cap = capacity(pixels.len())?;
    let header = decode_header(&pixels, cap.header_len)?;

    let text_len = header.text_bits();
    let image_len = header.image_bits();
    let image_is_long = image_len >= text_len;
    let (long_len, short_len) = if image_is_long {
        (image_len, text_len)
    } else {
        (text_len, image_len)
    };
    info!(
        "Header declares {} text bytes and a {}x{} image",
        header.text_len, header.img_width, header.img_height
    );
    if long_len > cap.payload_pixels {
        return Err(StegoError::MalformedInput(format!(
            "header declares {} payload bits but only {} pixels follow it; no hidden payload or wrong cover",
            long_len, cap.payload_pixels
        )));
    }

    let (long, short) = lsb::extract(&pixels[cap.header_len..], long_len, short_len, &key)?;
    let (image_bits, text_bits): (BitStream, BitStream) = if image_is_long {
        (long, short)
    } else {
        (short, long)
    };

    let image = if image_len > 0 {
        Some(bits_to_image(&image_bits, header.img_width, header.img_height)?)
    } else {
        None
    };
    let text = if text_len > 0 {
        Some(bits_to_text(&text_bits)?)
    } else {
        None
    };

    Ok(Extracted { image, text })
}
