//! Keyed LSB steganography: hide an image, a text, or both inside the
//! least significant bits of a cover image.
//!
//! The first `L` cover pixels carry the payload sizes. The pixels after them
//! carry the payload bits, with the secret key choosing per pixel whether
//! green or blue holds the longer of the two payload streams.

pub mod bits;
pub mod config;
pub mod error;
pub mod header;
pub mod lsb;
pub mod quality;
pub mod selector;
pub mod stego;
pub mod store;

pub use config::StegoConfig;
pub use error::{PayloadKind, StegoError};
pub use header::Header;
pub use selector::SecretKey;
pub use stego::{capacity, decode, encode, Capacity, Extracted};
pub use store::{decode_file, encode_file, DecodedFiles};

/// Largest value a channel sample can take, for PSNR.
pub const MAX_INTENSITY: f64 = 255.0;
