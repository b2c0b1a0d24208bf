//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom delle utility.
//!
//! ## Responsabilità:
//! - Definisce l'enum `PrepError` per categorizzare gli errori possibili
//! - Integra con `thiserror` per automatic error conversion
//! - Distingue errori di validazione (fatali, exit non-zero) da errori
//!   per-file (loggati, il run continua)
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica/encoding immagini
//! - `Ffmpeg`: Errori di conversione audio con FFmpeg
//! - `Transcribe`: Errori del processo whisper
//! - `NoSpeech`: Nessun parlato rilevato nell'audio
//! - `UnsupportedFormat`: Estensione file non supportata
//! - `MissingDependency`: Tool esterno mancante (ffmpeg, whisper)
//! - `Validation`: Errori di validazione input

/// Custom error types for media preparation
#[derive(thiserror::Error, Debug)]
pub enum PrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    #[error("Transcription error: {0}")]
    Transcribe(String),

    #[error("No speech detected in audio")]
    NoSpeech,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
