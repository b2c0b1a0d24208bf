//! # Generate SRT - Entry Point
//!
//! Genera file sottotitoli SRT da audio MP3 usando la CLI whisper.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! generate-srt archive/ --model base --language en
//! generate-srt archive/episode.mp3 --output subs/
//! ```

use anyhow::Result;
use clap::Parser;
use media_prep::{SrtConfig, Transcriber, WhisperModel};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "generate-srt")]
#[command(about = "Generate SRT subtitle files from MP3 audio using Whisper")]
struct Args {
    /// Path to MP3 file or directory containing MP3 files
    #[arg(default_value = "archive")]
    input_path: PathBuf,

    /// Whisper model size
    #[arg(long, value_enum, default_value = "base")]
    model: WhisperModel,

    /// Language code (e.g. 'en' for English, 'auto' for auto-detect)
    #[arg(long, default_value = "en")]
    language: String,

    /// Output directory for SRT files (default: same as input)
    #[arg(long)]
    output: Option<PathBuf>,

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

    Transcriber::ensure_whisper().await?;

    let config = SrtConfig {
        model: args.model,
        language: if args.language == "auto" {
            None
        } else {
            Some(args.language)
        },
        output_dir: args.output,
    };

    let summary = Transcriber::new(config).run(&args.input_path).await?;
    info!("{}", summary.format_summary());

    // A directory run with failures is a failed run, even though the loop
    // kept going to process the remaining files
    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
