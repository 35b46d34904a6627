//! File-level encode and decode: opening covers and payloads, naming and
//! persisting outputs.
//!
//! Every image entering the core is converted to 3-channel RGB, so alpha
//! channels are dropped on load.

use crate::config::{OutputConfig, StegoConfig};
use crate::error::{Result, StegoError};
use crate::stego;
use image::RgbImage;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths written by [`decode_file`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodedFiles {
    pub image: Option<PathBuf>,
    pub text: Option<PathBuf>,
}

/// Opens an image file as an RGB grid.
pub fn open_image(path: &Path, what: &'static str) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| StegoError::SourceUnavailable {
        what,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgb8())
}

pub fn save_image(grid: &RgbImage, path: &Path) -> Result<()> {
    grid.save(path).map_err(|e| StegoError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Width and height of a grid.
pub fn size(grid: &RgbImage) -> (u32, u32) {
    grid.dimensions()
}

/// Reads the hidden-text file, optionally trimmed.
pub fn read_text(path: &Path, trim: bool) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| StegoError::SourceUnavailable {
        what: "hidden text file",
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(if trim { text.trim().to_string() } else { text })
}

/// `<dir>/<stem>-<suffix>.<ext>` next to the cover.
pub fn encoded_path(cover: &Path, output: &OutputConfig) -> PathBuf {
    let stem = cover
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    cover.with_file_name(format!(
        "{}-{}.{}",
        stem, output.encoded_suffix, output.encoded_extension
    ))
}

fn output_dir(encoded: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => encoded.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

pub fn hidden_image_path(dir: &Path, output: &OutputConfig) -> PathBuf {
    dir.join(format!(
        "{}.{}",
        output.hidden_image_name, output.hidden_image_extension
    ))
}

pub fn hidden_text_path(dir: &Path, output: &OutputConfig) -> PathBuf {
    dir.join(&output.hidden_text_name)
}

/// Hides an image file and/or a text file in `cover` and saves the result.
///
/// Returns the path of the encoded image: `output` when given, otherwise
/// [`encoded_path`].
pub fn encode_file(
    cover: &Path,
    hidden_image: Option<&Path>,
    hidden_text: Option<&Path>,
    key: &str,
    output: Option<&Path>,
    config: &StegoConfig,
) -> Result<PathBuf> {
    if key.is_empty() {
        return Err(StegoError::MissingKey);
    }
    if hidden_image.is_none() && hidden_text.is_none() {
        return Err(StegoError::NothingToHide);
    }

    let cover_img = open_image(cover, "cover image")?;
    info!(
        "Opened cover '{}' ({}x{})",
        cover.display(),
        cover_img.width(),
        cover_img.height()
    );
    let payload_img = hidden_image
        .map(|path| open_image(path, "hidden image"))
        .transpose()?;
    let payload_text = hidden_text
        .map(|path| read_text(path, config.payload.trim_text))
        .transpose()?;
    if payload_text.as_deref() == Some("") {
        warn!("Hidden text file is empty, no text will be hidden");
    }

    let encoded = stego::encode(
        &cover_img,
        payload_img.as_ref(),
        payload_text.as_deref(),
        key,
    )?;

    let out = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| encoded_path(cover, &config.output));
    save_image(&encoded, &out)?;
    info!("Saved encoded image to '{}'", out.display());
    Ok(out)
}

/// Recovers the payloads of an encoded image file and writes them next to
/// it (or into `output`).
pub fn decode_file(
    encoded: &Path,
    key: &str,
    output: Option<&Path>,
    config: &StegoConfig,
) -> Result<DecodedFiles> {
    if key.is_empty() {
        return Err(StegoError::MissingKey);
    }
    let img = open_image(encoded, "encoded image")?;
    let extracted = stego::decode(&img, key)?;

    let dir = output_dir(encoded, output);
    let mut files = DecodedFiles::default();
    if let Some(hidden) = extracted.image {
        let path = hidden_image_path(&dir, &config.output);
        save_image(&hidden, &path)?;
        info!("Recovered hidden image to '{}'", path.display());
        files.image = Some(path);
    }
    if let Some(text) = extracted.text {
        let path = hidden_text_path(&dir, &config.output);
        fs::write(&path, text).map_err(|e| StegoError::Persist {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!("Recovered hidden text to '{}'", path.display());
        files.text = Some(path);
    }
    if files == DecodedFiles::default() {
        warn!("No hidden payload found in '{}'", encoded.display());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_path_keeps_directory_and_stem() {
        let out = OutputConfig::default();
        assert_eq!(
            encoded_path(Path::new("/tmp/pics/corvette.jpg"), &out),
            PathBuf::from("/tmp/pics/corvette-encoded.png")
        );
        assert_eq!(
            encoded_path(Path::new("lenna.png"), &out),
            PathBuf::from("lenna-encoded.png")
        );
    }

    #[test]
    fn decoded_names_follow_config() {
        let out = OutputConfig::default();
        let dir = Path::new("/tmp/pics");
        assert_eq!(
            hidden_image_path(dir, &out),
            PathBuf::from("/tmp/pics/hidden_img.png")
        );
        assert_eq!(
            hidden_text_path(dir, &out),
            PathBuf::from("/tmp/pics/hidden_text.txt")
        );
    }

    #[test]
    fn output_dir_defaults_to_encoded_parent() {
        assert_eq!(
            output_dir(Path::new("/a/b/c.png"), None),
            PathBuf::from("/a/b")
        );
        assert_eq!(
            output_dir(Path::new("/a/b/c.png"), Some(Path::new("/out"))),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn missing_sources_are_reported() {
        let config = StegoConfig::default();
        let err = encode_file(
            Path::new("/nonexistent/cover.png"),
            None,
            Some(Path::new("/nonexistent/text.txt")),
            "key",
            None,
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StegoError::SourceUnavailable {
                what: "cover image",
                ..
            }
        ));
    }

    #[test]
    fn read_text_trims_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "  secret message\n").unwrap();
        assert_eq!(read_text(&path, true).unwrap(), "secret message");
        assert_eq!(read_text(&path, false).unwrap(), "  secret message\n");
    }
}
