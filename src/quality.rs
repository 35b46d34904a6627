//! Distortion metrics between a cover and its encoded version.

use crate::error::{Result, StegoError};
use image::RgbImage;

/// Mean squared error over every R, G and B sample.
pub fn mse(a: &RgbImage, b: &RgbImage) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(StegoError::DimensionMismatch(format!(
            "{}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    let samples = a.as_raw().len();
    if samples == 0 {
        return Ok(0.0);
    }
    let sum: f64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();
    Ok(sum / samples as f64)
}

/// Peak signal-to-noise ratio in dB; infinite for identical images.
pub fn psnr(max_i: f64, mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (max_i * max_i / mse).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn identical_images() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        let err = mse(&img, &img).unwrap();
        assert_eq!(err, 0.0);
        assert!(psnr(255.0, err).is_infinite());
    }

    #[test]
    fn single_lsb_flip_everywhere() {
        let a = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let b = RgbImage::from_pixel(2, 2, Rgb([11, 21, 31]));
        let err = mse(&a, &b).unwrap();
        assert_eq!(err, 1.0);
        assert!((psnr(255.0, err) - 48.1308).abs() < 1e-3);
    }

    #[test]
    fn mismatched_sizes() {
        let a = RgbImage::new(2, 2);
        let b = RgbImage::new(2, 3);
        assert!(matches!(mse(&a, &b), Err(StegoError::DimensionMismatch(_))));
    }
}
