//! # Convert Audio - Entry Point
//!
//! Converte file audio verso OGG/MP4/AAC per compatibilità WebGL,
//! delegando il transcoding a FFmpeg.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! convert-audio archive/ --format ogg --quality 192k
//! convert-audio archive/ --format mp4 --output-dir converted/
//! ```

use anyhow::Result;
use clap::Parser;
use media_prep::{AudioConfig, AudioConverter, AudioFormat};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "convert-audio")]
#[command(about = "Convert audio files for web playback compatibility")]
struct Args {
    /// Audio file or directory to convert
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ogg")]
    format: AudioFormat,

    /// Audio quality/bitrate (e.g. 128k, 192k, 320k)
    #[arg(short, long, default_value = "192k")]
    quality: String,

    /// Output directory (default: same as input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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

    // No point enumerating files if the transcoder is missing
    AudioConverter::ensure_ffmpeg().await?;

    let config = AudioConfig {
        format: args.format,
        bitrate: args.quality,
        output_dir: args.output_dir,
        recursive: !args.no_recursive,
    };

    let summary = AudioConverter::new(config).run(&args.path).await?;
    info!("{}", summary.format_summary());

    Ok(())
}
