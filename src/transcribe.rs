//! # Transcription Module
//!
//! Questo modulo genera file SRT da audio MP3 invocando la CLI `whisper`
//! come processo esterno.
//!
//! ## Responsabilità:
//! - Invocazione di whisper con output JSON in una directory temporanea
//! - Parsing dei segmenti `{start, end, text}` dal JSON con serde
//! - Skip dei file con `.srt` già presente
//! - Nessun parlato rilevato = fallimento per-file, non crash del run
//!
//! ## Pipeline per file:
//! 1. Calcola il path `.srt` di destinazione (accanto all'input o in
//!    `--output`)
//! 2. Se esiste già: skip
//! 3. `whisper <audio> --model <m> --output_dir <tmp> --output_format json`
//! 4. Parse del JSON, scrittura SRT tramite [`crate::subtitle`]

use crate::config::SrtConfig;
use crate::error::PrepError;
use crate::file_manager::{FileManager, TRANSCRIBE_EXTENSIONS};
use crate::progress::{FileOutcome, RunSummary};
use crate::subtitle::{self, Segment};
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info};

/// Whisper CLI JSON output format (unused fields ignored)
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Generates SRT subtitles from MP3 audio via the whisper CLI
pub struct Transcriber {
    config: SrtConfig,
}

impl Transcriber {
    pub fn new(config: SrtConfig) -> Self {
        Self { config }
    }

    /// Fail fast when the whisper CLI is not installed.
    pub async fn ensure_whisper() -> Result<(), PrepError> {
        let status = Command::new("whisper")
            .arg("--help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        match status {
            Ok(s) if s.success() => Ok(()),
            _ => Err(PrepError::MissingDependency("whisper".to_string())),
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
        if !FileManager::has_extension(path, TRANSCRIBE_EXTENSIONS) {
            return Err(PrepError::Validation(format!(
                "{} is not an MP3 file",
                path.display()
            ))
            .into());
        }

        info!("Processing single file: {}", path.display());
        let mut summary = RunSummary::new();
        let result = self.process_file(path).await;
        self.report_file(path, &result);
        summary.record(&result);

        if let Err(e) = result {
            return Err(e.into());
        }
        Ok(summary)
    }

    async fn run_directory(&self, dir: &Path) -> Result<RunSummary> {
        // Matches the archive layout this tool was written for: MP3s sit at
        // the top level, so no recursive walk here.
        let files = FileManager::find_files(dir, TRANSCRIBE_EXTENSIONS, false);
        if files.is_empty() {
            return Err(
                PrepError::Validation(format!("No MP3 files found in {}", dir.display())).into(),
            );
        }

        info!("Found {} MP3 files in {}", files.len(), dir.display());

        let mut summary = RunSummary::new();
        for (i, file) in files.iter().enumerate() {
            info!(
                "[{}/{}] Processing: {}",
                i + 1,
                files.len(),
                file.file_name().unwrap_or_default().to_string_lossy()
            );
            let result = self.process_file(file).await;
            self.report_file(file, &result);
            summary.record(&result);
        }

        info!("{}", summary.format_summary());
        Ok(summary)
    }

    /// Destination `.srt`: `--output` dir if given, otherwise next to input.
    fn srt_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let filename = format!("{}.srt", stem);
        let dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());
        dir.join(filename)
    }

    fn whisper_args(&self, audio: &Path, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            audio.display().to_string(),
            "--model".to_string(),
            self.config.model.name().to_string(),
            "--output_dir".to_string(),
            output_dir.display().to_string(),
            "--output_format".to_string(),
            "json".to_string(),
            "--task".to_string(),
            "transcribe".to_string(),
        ];
        if let Some(ref lang) = self.config.language {
            args.push("--language".to_string());
            args.push(lang.clone());
        }
        args
    }

    /// Run whisper into a temp dir and parse the segments it produced.
    async fn transcribe(&self, audio: &Path) -> Result<Vec<Segment>, PrepError> {
        let temp_dir = tempfile::tempdir()?;

        let output = Command::new("whisper")
            .args(self.whisper_args(audio, temp_dir.path()))
            .output()
            .await
            .map_err(|e| PrepError::Transcribe(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            return Err(PrepError::Transcribe(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        let stem = audio.file_stem().unwrap_or_default().to_string_lossy();
        let json_path = temp_dir.path().join(format!("{}.json", stem));
        let content = tokio::fs::read_to_string(&json_path)
            .await
            .map_err(|e| PrepError::Transcribe(format!("Missing whisper output: {}", e)))?;

        Ok(parse_segments(&content)?)
    }

    async fn process_file(&self, audio: &Path) -> Result<FileOutcome, PrepError> {
        let original_bytes = tokio::fs::metadata(audio).await?.len();
        let srt_path = self.srt_path_for(audio);

        if let Some(parent) = srt_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if srt_path.exists() {
            return Ok(FileOutcome {
                path: srt_path,
                original_bytes,
                final_bytes: original_bytes,
                changed: false,
            });
        }

        let segments = self.transcribe(audio).await?;
        if segments.is_empty() {
            return Err(PrepError::NoSpeech);
        }

        subtitle::write_srt(&segments, &srt_path).await?;

        let word_count: usize = segments
            .iter()
            .map(|s| s.text.split_whitespace().count())
            .sum();
        info!(
            "Created {} ({} segments, {} words)",
            srt_path.file_name().unwrap_or_default().to_string_lossy(),
            segments.len(),
            word_count
        );

        let final_bytes = tokio::fs::metadata(&srt_path).await?.len();
        Ok(FileOutcome {
            path: srt_path,
            original_bytes,
            final_bytes,
            changed: true,
        })
    }

    fn report_file(&self, path: &Path, result: &Result<FileOutcome, PrepError>) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            // Successful creation is logged by process_file with its stats
            Ok(outcome) if outcome.changed => {}
            Ok(outcome) => info!(
                "{}: SRT already exists: {}",
                name,
                outcome.path.file_name().unwrap_or_default().to_string_lossy()
            ),
            Err(e) => error!("{}: {}", name, e),
        }
    }
}

/// Parse the whisper JSON document into subtitle segments.
fn parse_segments(json: &str) -> Result<Vec<Segment>, PrepError> {
    let parsed: WhisperOutput = serde_json::from_str(json)
        .map_err(|e| PrepError::Transcribe(format!("Invalid whisper JSON: {}", e)))?;
    Ok(parsed
        .segments
        .into_iter()
        .map(|s| Segment {
            start: s.start,
            end: s.end,
            text: s.text,
        })
        .collect())
}
