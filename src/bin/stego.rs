use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lsb_stego::config::{load_config, StegoConfig};
use lsb_stego::{capacity, quality, store, MAX_INTENSITY};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Hide images and text in the LSBs of a cover image", long_about = None)]
struct Cli {
    /// Optional TOML file overriding output names
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide an image and/or a text file inside a cover image
    Encode {
        /// Path of the cover image
        #[arg(short = 'c', long = "cover")]
        cover: PathBuf,

        /// Secret key
        #[arg(short = 's', long = "secret")]
        secret: String,

        /// Path of the image to hide
        #[arg(long = "hi")]
        hidden_image: Option<PathBuf>,

        /// Path of the text file to hide
        #[arg(long = "ht")]
        hidden_text: Option<PathBuf>,

        /// Where to save the encoded image (default: <cover>-encoded.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the hidden image and/or text from an encoded image
    Decode {
        /// Path of the encoded image
        #[arg(short = 'c', long = "cover")]
        cover: PathBuf,

        /// Secret key
        #[arg(short = 's', long = "secret")]
        secret: String,

        /// Directory for the recovered files (default: next to the image)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report MSE and PSNR between two images
    Psnr {
        #[arg(short = 'a', long)]
        original: PathBuf,

        #[arg(short = 'b', long)]
        modified: PathBuf,
    },
    /// Show how much a cover image can hold
    Capacity {
        #[arg(short = 'c', long = "cover")]
        cover: PathBuf,
    },
}

/// Accepts the historical `-hi` / `-ht` spellings.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-hi") => OsString::from("--hi"),
            Some("-ht") => OsString::from("--ht"),
            _ => arg,
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => StegoConfig::default(),
    };

    match &cli.command {
        Commands::Encode {
            cover,
            secret,
            hidden_image,
            hidden_text,
            output,
        } => handle_encode(
            cover,
            secret,
            hidden_image.as_deref(),
            hidden_text.as_deref(),
            output.as_deref(),
            &config,
        )?,
        Commands::Decode {
            cover,
            secret,
            output,
        } => handle_decode(cover, secret, output.as_deref(), &config)?,
        Commands::Psnr { original, modified } => handle_psnr(original, modified)?,
        Commands::Capacity { cover } => handle_capacity(cover)?,
    }

    Ok(())
}

fn handle_encode(
    cover: &Path,
    secret: &str,
    hidden_image: Option<&Path>,
    hidden_text: Option<&Path>,
    output: Option<&Path>,
    config: &StegoConfig,
) -> Result<()> {
    let out = store::encode_file(cover, hidden_image, hidden_text, secret, output, config)
        .with_context(|| format!("Failed to encode into '{}'", cover.display()))?;
    println!("Encoded image written to '{}'", out.display());
    Ok(())
}

fn handle_decode(
    encoded: &Path,
    secret: &str,
    output: Option<&Path>,
    config: &StegoConfig,
) -> Result<()> {
    let files = store::decode_file(encoded, secret, output, config)
        .with_context(|| format!("Failed to decode '{}'", encoded.display()))?;
    if let Some(path) = &files.image {
        println!("Hidden image written to '{}'", path.display());
    }
    if let Some(path) = &files.text {
        println!("Hidden text written to '{}'", path.display());
    }
    if files.image.is_none() && files.text.is_none() {
        println!("Nothing hidden in '{}'", encoded.display());
    }
    Ok(())
}

fn handle_psnr(original: &Path, modified: &Path) -> Result<()> {
    let a = store::open_image(original, "original image")?;
    let b = store::open_image(modified, "modified image")?;
    let mse = quality::mse(&a, &b)?;
    println!("MSE:  {:.6}", mse);
    println!("PSNR: {:.4} dB", quality::psnr(MAX_INTENSITY, mse));
    Ok(())
}

fn handle_capacity(cover: &Path) -> Result<()> {
    let img = store::open_image(cover, "cover image")?;
    let (width, height) = store::size(&img);
    let cap = capacity(width as usize * height as usize)?;
    println!("Cover:            {}x{}", width, height);
    println!("Header pixels:    {}", cap.header_len);
    println!("Max text bytes:   {}", cap.max_text_chars);
    println!("Max image pixels: {}", cap.max_image_pixels);
    Ok(())
}
