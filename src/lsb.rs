//! Keyed two-stream LSB interleaving over the payload region of a cover.
//!
//! Every payload pixel carries one bit of the long stream and, while the
//! short stream lasts, one bit of the short stream. The selector bit decides
//! which of green/blue holds the long stream; the other holds the short one.

use crate::bits::{replace_lsb, BitStream};
use crate::error::{Result, StegoError};
use crate::selector::{selector_bit, SecretKey};
use image::Rgb;

/// Writes `long` and `short` into the payload pixels `carrier`.
///
/// Returns the rewritten pixels, exactly `long.len()` of them. The caller
/// must have checked that `carrier` is long enough and that
/// `short.len() <= long.len()`.
pub fn embed(carrier: &[Rgb<u8>], long: &[u8], short: &[u8], key: &SecretKey) -> Result<Vec<Rgb<u8>>> {
    if carrier.len() < long.len() {
        return Err(StegoError::MalformedInput(format!(
            "cannot write {} payload bits into {} pixels",
            long.len(),
            carrier.len()
        )));
    }
    debug_assert!(short.len() <= long.len());

    let out = carrier
        .iter()
        .zip(long)
        .enumerate()
        .map(|(i, (px, &long_bit))| {
            let Rgb([r, mut g, mut b]) = *px;
            let short_bit = short.get(i).copied();
            if selector_bit(px, i, key) == 1 {
                g = replace_lsb(g, long_bit);
                if let Some(bit) = short_bit {
                    b = replace_lsb(b, bit);
                }
            } else {
                b = replace_lsb(b, long_bit);
                if let Some(bit) = short_bit {
                    g = replace_lsb(g, bit);
                }
            }
            Rgb([r, g, b])
        })
        .collect();

    Ok(out)
}

/// Reads `long_len` long-stream bits and `short_len` short-stream bits back
/// from the payload pixels `carrier`.
pub fn extract(
    carrier: &[Rgb<u8>],
    long_len: usize,
    short_len: usize,
    key: &SecretKey,
) -> Result<(BitStream, BitStream)> {
    if carrier.len() < long_len || short_len > long_len {
        return Err(StegoError::MalformedInput(format!(
            "cannot read {} + {} payload bits from {} pixels",
            long_len,
            short_len,
            carrier.len()
        )));
    }

    let mut long = BitStream::with_capacity(long_len);
    let mut short = BitStream::with_capacity(short_len);
    for (i, px) in carrier[..long_len].iter().enumerate() {
        let Rgb([_, g, b]) = *px;
        let (primary, secondary) = if selector_bit(px, i, key) == 1 {
            (g, b)
        } else {
            (b, g)
        };
        long.push(primary & 1);
        if i < short_len {
            short.push(secondary & 1);
        }
    }

    Ok((long, short))
}
