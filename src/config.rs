//! # Configuration Management Module
//!
//! Questo modulo definisce la configurazione delle quattro utility.
//!
//! ## Responsabilità:
//! - Una struct di configurazione per utility con default sensati
//! - Validazione robusta dei parametri prima di toccare qualsiasi file
//! - Normalizzazione di `max_dimension` al multiplo di 4 più vicino
//!
//! ## Validazione:
//! - `quality` deve essere 1-100
//! - `max_dimension` deve essere >= 4 (poi arrotondato a multiplo di 4)
//! - `min_size_mb` deve essere non-negativo
//!
//! Un errore di validazione è fatale: il processo esce non-zero senza
//! toccare alcun file.

use crate::dimensions::round_to_multiple_of_4;
use crate::error::PrepError;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::info;

/// Configuration for the resize utility
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// Longer-side pixel cap (default: 3840 for 4K)
    pub max_dimension: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Process subdirectories
    pub recursive: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_dimension: 3840,
            quality: 85,
            recursive: true,
        }
    }
}

impl ResizeConfig {
    /// Validate parameters and normalize `max_dimension` to a multiple of 4.
    ///
    /// The adjustment is logged so a run is reproducible from its output.
    pub fn validated(mut self) -> Result<Self, PrepError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(PrepError::Validation(
                "Quality must be between 1 and 100".to_string(),
            ));
        }
        if self.max_dimension < 4 {
            return Err(PrepError::Validation(
                "Maximum dimension must be at least 4".to_string(),
            ));
        }
        if self.max_dimension % 4 != 0 {
            let adjusted = round_to_multiple_of_4(self.max_dimension);
            info!(
                "Adjusted max dimension to {} (nearest multiple of 4)",
                adjusted
            );
            self.max_dimension = adjusted;
        }
        Ok(self)
    }
}

/// Configuration for the compress utility
#[derive(Debug, Clone)]
pub struct CompressConfig {
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Minimum file size in MB to compress
    pub min_size_mb: f64,
    /// Process subdirectories
    pub recursive: bool,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            min_size_mb: 2.0,
            recursive: true,
        }
    }
}

impl CompressConfig {
    pub fn validated(self) -> Result<Self, PrepError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(PrepError::Validation(
                "Quality must be between 1 and 100".to_string(),
            ));
        }
        if self.min_size_mb < 0.0 {
            return Err(PrepError::Validation(
                "Minimum size must be non-negative".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Target container/codec for audio conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioFormat {
    Ogg,
    Mp4,
    Aac,
}

impl AudioFormat {
    /// Output file extension
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Ogg => "ogg",
            AudioFormat::Mp4 => "mp4",
            AudioFormat::Aac => "aac",
        }
    }

    /// FFmpeg codec name
    pub fn codec(&self) -> &'static str {
        match self {
            AudioFormat::Ogg => "libvorbis",
            AudioFormat::Mp4 | AudioFormat::Aac => "aac",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for the audio conversion utility
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Target format
    pub format: AudioFormat,
    /// Audio bitrate passed to ffmpeg (e.g. "192k")
    pub bitrate: String,
    /// Output directory (None = next to the input file)
    pub output_dir: Option<PathBuf>,
    /// Process subdirectories
    pub recursive: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::Ogg,
            bitrate: "192k".to_string(),
            output_dir: None,
            recursive: true,
        }
    }
}

/// Whisper model size
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    /// Model name as the whisper CLI expects it
    pub fn name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

/// Configuration for the SRT generation utility
#[derive(Debug, Clone)]
pub struct SrtConfig {
    /// Whisper model size
    pub model: WhisperModel,
    /// Language code (None = auto-detect)
    pub language: Option<String>,
    /// Output directory for SRT files (None = next to the input file)
    pub output_dir: Option<PathBuf>,
}

impl Default for SrtConfig {
    fn default() -> Self {
        Self {
            model: WhisperModel::Base,
            language: Some("en".to_string()),
            output_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_config_validation() {
        assert!(ResizeConfig::default().validated().is_ok());

        let mut config = ResizeConfig::default();
        config.quality = 0;
        assert!(config.validated().is_err());

        let mut config = ResizeConfig::default();
        config.quality = 101;
        assert!(config.validated().is_err());

        let mut config = ResizeConfig::default();
        config.max_dimension = 3;
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_max_dimension_normalized_to_multiple_of_4() {
        let mut config = ResizeConfig::default();
        config.max_dimension = 3841;
        let config = config.validated().unwrap();
        assert_eq!(config.max_dimension, 3840);

        let mut config = ResizeConfig::default();
        config.max_dimension = 3843;
        let config = config.validated().unwrap();
        assert_eq!(config.max_dimension, 3844);
    }

    #[test]
    fn test_compress_config_validation() {
        assert!(CompressConfig::default().validated().is_ok());

        let mut config = CompressConfig::default();
        config.min_size_mb = -1.0;
        assert!(config.validated().is_err());

        let mut config = CompressConfig::default();
        config.quality = 0;
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_audio_format_mapping() {
        assert_eq!(AudioFormat::Ogg.extension(), "ogg");
        assert_eq!(AudioFormat::Ogg.codec(), "libvorbis");
        assert_eq!(AudioFormat::Mp4.codec(), "aac");
        assert_eq!(AudioFormat::Aac.codec(), "aac");
    }

    #[test]
    fn test_whisper_model_names() {
        assert_eq!(WhisperModel::Base.name(), "base");
        assert_eq!(WhisperModel::Large.name(), "large");
    }
}
