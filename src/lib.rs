//! # Media Prep Library
//!
//! Questo è il modulo principale della libreria che espone le API delle
//! quattro utility batch di preparazione asset.
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione e validazione parametri per utility
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `dimensions`: Normalizzazione pura delle dimensioni (multipli di 4, cap 4K)
//! - `codec`: Decode, resample e re-encode immagini in-process
//! - `file_manager`: Discovery file e utilità sulle dimensioni
//! - `progress`: Progress tracking e riepilogo del run
//! - `resizer`: Orchestrazione resize immagini
//! - `compressor`: Orchestrazione compressione immagini
//! - `audio`: Conversione audio via FFmpeg
//! - `transcribe`: Generazione SRT via whisper
//! - `subtitle`: Formattazione e scrittura file SRT
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use media_prep::{ImageResizer, ResizeConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ResizeConfig::default().validated()?;
//! let summary = ImageResizer::new(config).run(std::path::Path::new("photos")).await?;
//! println!("{}", summary.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod codec;
pub mod compressor;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod file_manager;
pub mod progress;
pub mod resizer;
pub mod subtitle;
pub mod transcribe;

pub use audio::AudioConverter;
pub use compressor::ImageCompressor;
pub use config::{AudioConfig, AudioFormat, CompressConfig, ResizeConfig, SrtConfig, WhisperModel};
pub use dimensions::{normalize, Dimensions, ResizeDecision};
pub use error::PrepError;
pub use progress::{FileOutcome, RunSummary};
pub use resizer::ImageResizer;
pub use transcribe::Transcriber;
