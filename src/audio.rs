//! # Audio Conversion Module
//!
//! Questo modulo converte file audio verso OGG/MP4/AAC invocando FFmpeg
//! come processo esterno.
//!
//! ## Responsabilità:
//! - Verifica che `ffmpeg` sia sul PATH prima di toccare qualsiasi file
//! - Calcolo del path di output (directory dedicata o accanto all'input)
//! - Un output già esistente è uno skip, non un errore
//! - I file già nel formato target vengono filtrati dalla discovery
//!
//! ## Invocazione FFmpeg:
//! `ffmpeg -i input -vn -c:a <codec> -b:a <bitrate> -y output`, con
//! `-loglevel warning` a meno che il logging non sia a livello DEBUG.

use crate::config::AudioConfig;
use crate::error::PrepError;
use crate::file_manager::{FileManager, AUDIO_EXTENSIONS};
use crate::progress::{FileOutcome, ProgressManager, RunSummary};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Transcodes audio files through an external ffmpeg process
pub struct AudioConverter {
    config: AudioConfig,
}

impl AudioConverter {
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Fail fast when ffmpeg is not installed or not on PATH.
    pub async fn ensure_ffmpeg() -> Result<(), PrepError> {
        let status = Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        match status {
            Ok(s) if s.success() => Ok(()),
            _ => Err(PrepError::MissingDependency("ffmpeg".to_string())),
        }
    }

    pub async fn run(&self, path: &Path) -> Result<RunSummary> {
        if path.is_file() {
            self.run_single(path).await
        } else if path.is_dir() {
            self.run_directory(path).await
        } else {
            Err(PrepError::Validation(format!("Path does not exist: {}", path.display())).into())
        }
    }

    async fn run_single(&self, path: &Path) -> Result<RunSummary> {
        if !FileManager::has_extension(path, AUDIO_EXTENSIONS) {
            let ext = path.extension().unwrap_or_default().to_string_lossy();
            return Err(PrepError::UnsupportedFormat(ext.to_string()).into());
        }

        info!(
            "Converting single file: {} (format: {}, bitrate: {})",
            path.display(),
            self.config.format,
            self.config.bitrate
        );

        let mut summary = RunSummary::new();
        let result = self.process_file(path).await;
        self.report_file(path, &result);
        summary.record(&result);

        // A lone conversion that fails is a failed run
        if let Err(e) = result {
            return Err(e.into());
        }
        Ok(summary)
    }

    async fn run_directory(&self, dir: &Path) -> Result<RunSummary> {
        let files = self.conversion_candidates(dir);
        let mut summary = RunSummary::new();

        if files.is_empty() {
            warn!("No audio files found in {}", dir.display());
            return Ok(summary);
        }

        info!(
            "Found {} audio files to convert (format: {}, bitrate: {})",
            files.len(),
            self.config.format,
            self.config.bitrate
        );

        let progress = ProgressManager::new(files.len() as u64);
        for file in &files {
            let result = self.process_file(file).await;
            self.report_file(file, &result);
            summary.record(&result);
            progress.update(&file.file_name().unwrap_or_default().to_string_lossy());
        }
        progress.finish(&summary.format_summary());

        Ok(summary)
    }

    /// Audio files under `dir`, minus those already in the target format.
    fn conversion_candidates(&self, dir: &Path) -> Vec<PathBuf> {
        let target_ext = [self.config.format.extension()];
        FileManager::find_files(dir, AUDIO_EXTENSIONS, self.config.recursive)
            .into_iter()
            .filter(|p| !FileManager::has_extension(p, &target_ext))
            .collect()
    }

    /// Where the converted file goes: `--output-dir` if given, otherwise
    /// next to the input, always `<stem>.<format>`.
    fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let filename = format!("{}.{}", stem, self.config.format.extension());
        let dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());
        dir.join(filename)
    }

    fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            input.display().to_string(),
            "-vn".to_string(),
            "-c:a".to_string(),
            self.config.format.codec().to_string(),
            "-b:a".to_string(),
            self.config.bitrate.clone(),
        ];
        if !tracing::enabled!(tracing::Level::DEBUG) {
            args.push("-loglevel".to_string());
            args.push("warning".to_string());
        }
        args.push("-y".to_string());
        args.push(output.display().to_string());
        args
    }

    async fn process_file(&self, input: &Path) -> Result<FileOutcome, PrepError> {
        let original_bytes = tokio::fs::metadata(input).await?.len();
        let output = self.output_path_for(input);

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if output.exists() {
            debug!("Output already exists: {}", output.display());
            return Ok(FileOutcome {
                path: input.to_path_buf(),
                original_bytes,
                final_bytes: original_bytes,
                changed: false,
            });
        }

        let start = std::time::Instant::now();
        let result = Command::new("ffmpeg")
            .args(self.ffmpeg_args(input, &output))
            .output()
            .await
            .map_err(|e| PrepError::Ffmpeg(format!("Failed to execute ffmpeg: {}", e)))?;

        if !result.status.success() {
            return Err(PrepError::Ffmpeg(
                String::from_utf8_lossy(&result.stderr).to_string(),
            ));
        }

        let final_bytes = tokio::fs::metadata(&output).await?.len();
        debug!(
            "Converted {} in {:.1}s",
            input.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(FileOutcome {
            path: output,
            original_bytes,
            final_bytes,
            changed: true,
        })
    }

    fn report_file(&self, path: &Path, result: &Result<FileOutcome, PrepError>) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            Ok(outcome) if outcome.changed => info!(
                "{}: {} -> {} ({:+.1}%), output: {}",
                name,
                FileManager::format_size(outcome.original_bytes),
                FileManager::format_size(outcome.final_bytes),
                FileManager::size_change_percent(outcome.original_bytes, outcome.final_bytes),
                outcome.path.display()
            ),
            Ok(_) => info!("{}: output already exists, skipped", name),
            Err(e) => error!("{}: {}", name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AudioFormat;
    use std::fs;
    use tempfile::TempDir;

    fn converter(config: AudioConfig) -> AudioConverter {
        AudioConverter::new(config)
    }

    #[test]
    fn test_output_path_next_to_input() {
        let c = converter(AudioConfig::default());
        let out = c.output_path_for(Path::new("/music/track.mp3"));
        assert_eq!(out, PathBuf::from("/music/track.ogg"));
    }

    #[test]
    fn test_output_path_with_output_dir() {
        let mut config = AudioConfig::default();
        config.format = AudioFormat::Mp4;
        config.output_dir = Some(PathBuf::from("/converted"));
        let c = converter(config);
        let out = c.output_path_for(Path::new("/music/track.wav"));
        assert_eq!(out, PathBuf::from("/converted/track.mp4"));
    }

    #[test]
    fn test_ffmpeg_args_carry_codec_and_bitrate() {
        let mut config = AudioConfig::default();
        config.bitrate = "256k".to_string();
        let c = converter(config);
        let args = c.ffmpeg_args(Path::new("in.mp3"), Path::new("out.ogg"));

        assert!(args.contains(&"libvorbis".to_string()));
        assert!(args.contains(&"256k".to_string()));
        assert_eq!(args.last().unwrap(), "out.ogg");
    }

    #[test]
    fn test_candidates_exclude_target_format() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.mp3"), b"x").unwrap();
        fs::write(tmp.path().join("b.ogg"), b"x").unwrap();
        fs::write(tmp.path().join("c.wav"), b"x").unwrap();

        let c = converter(AudioConfig::default());
        let candidates = c.conversion_candidates(tmp.path());
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|p| !p.ends_with("b.ogg")));
    }

    #[tokio::test]
    async fn test_existing_output_is_skip_without_ffmpeg() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("track.mp3");
        fs::write(&input, b"fake mp3").unwrap();
        fs::write(tmp.path().join("track.ogg"), b"already here").unwrap();

        let c = converter(AudioConfig::default());
        let outcome = c.process_file(&input).await.unwrap();
        assert!(!outcome.changed);
    }

    #[tokio::test]
    async fn test_single_file_unsupported_extension_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cover.jpg");
        fs::write(&path, b"x").unwrap();

        let c = converter(AudioConfig::default());
        assert!(c.run(&path).await.is_err());
    }
}
