//! # Compress Images - Entry Point
//!
//! Ricomprime PNG e JPEG in-place sopra una soglia minima di dimensione.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! compress-images /path/to/images --quality 85 --min-size 2.0
//! ```

use anyhow::Result;
use clap::Parser;
use media_prep::{CompressConfig, ImageCompressor};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "compress-images")]
#[command(about = "Compress PNG and JPEG images in-place")]
struct Args {
    /// Directory containing images to compress OR path to single image file
    path: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, default_value = "85")]
    quality: u8,

    /// Minimum file size in MB to compress
    #[arg(long, default_value = "2.0")]
    min_size: f64,

    /// Do not process subdirectories
    #[arg(long)]
    no_recursive: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CompressConfig {
        quality: args.quality,
        min_size_mb: args.min_size,
        recursive: !args.no_recursive,
    }
    .validated()?;

    let summary = ImageCompressor::new(config).run(&args.path).await?;
    info!("{}", summary.format_summary());

    Ok(())
}
