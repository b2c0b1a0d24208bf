//! # Resize Images - Entry Point
//!
//! Normalizza le dimensioni delle immagini in-place: divisibili per 4 e
//! dentro il limite 4K, preservando l'aspect ratio per quanto possibile.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! resize-images /path/to/images --max-dimension 3840 --quality 85
//! ```

use anyhow::Result;
use clap::Parser;
use media_prep::{ImageResizer, ResizeConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "resize-images")]
#[command(about = "Resize images to be divisible by 4 with a 4K limit")]
struct Args {
    /// Directory containing images to resize OR path to single image file
    path: PathBuf,

    /// Maximum dimension in pixels (default: 3840 for 4K)
    #[arg(long, default_value = "3840")]
    max_dimension: u32,

    /// JPEG quality (1-100)
    #[arg(long, default_value = "85")]
    quality: u8,

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

    let config = ResizeConfig {
        max_dimension: args.max_dimension,
        quality: args.quality,
        recursive: !args.no_recursive,
    }
    .validated()?;

    let summary = ImageResizer::new(config).run(&args.path).await?;
    info!("{}", summary.format_summary());

    Ok(())
}
