//! Error taxonomy shared by every stage of the embedding protocol.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which payload exceeded the cover's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Text,
    Image,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Text => write!(f, "hidden text is too long"),
            PayloadKind::Image => write!(f, "hidden image is too big"),
        }
    }
}

/// Errors that can occur while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Secret key is needed")]
    MissingKey,

    #[error("Nothing to hide: give a hidden image, a hidden text, or both")]
    NothingToHide,

    #[error("Can't open {what} '{}': {reason}", path.display())]
    SourceUnavailable {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("{kind}: needs {needed} bits, cover has room for {capacity}")]
    PayloadTooLarge {
        kind: PayloadKind,
        needed: usize,
        capacity: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Value {value} does not fit in {width} bits")]
    Overflow { value: u64, width: usize },

    #[error("Cover image too small: {pixels} pixels, need at least 8")]
    CoverTooSmall { pixels: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Can't write '{}': {reason}", path.display())]
    Persist { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, StegoError>;
