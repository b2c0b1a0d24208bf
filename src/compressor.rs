//! # Image Compression Orchestration
//!
//! Questo modulo orchestra la ricompressione in-place di PNG e JPEG.
//!
//! ## Responsabilità:
//! - Dispatch file singolo vs directory
//! - Soglia minima di dimensione: i file sotto `min_size_mb` vengono
//!   saltati senza essere toccati
//! - Re-encode con parametri per formato: JPEG a qualità configurabile,
//!   PNG a compressione lossless massima
//! - Gli errori per-file vengono loggati e il loop continua

use crate::codec::{self, EncodeParams};
use crate::config::CompressConfig;
use crate::error::PrepError;
use crate::file_manager::{FileManager, IMAGE_EXTENSIONS};
use crate::progress::{FileOutcome, ProgressManager, RunSummary};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Re-encodes images in place to reclaim disk space
pub struct ImageCompressor {
    config: CompressConfig,
}

impl ImageCompressor {
    pub fn new(config: CompressConfig) -> Self {
        Self { config }
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
        if !FileManager::has_extension(path, IMAGE_EXTENSIONS) {
            let ext = path.extension().unwrap_or_default().to_string_lossy();
            return Err(PrepError::UnsupportedFormat(ext.to_string()).into());
        }

        info!("Compressing single file: {}", path.display());
        let mut summary = RunSummary::new();
        let result = self.process_file(path).await;
        self.report_file(path, &result);
        summary.record(&result);
        Ok(summary)
    }

    async fn run_directory(&self, dir: &Path) -> Result<RunSummary> {
        let files = FileManager::find_files(dir, IMAGE_EXTENSIONS, self.config.recursive);
        let mut summary = RunSummary::new();

        if files.is_empty() {
            warn!("No image files found in {}", dir.display());
            return Ok(summary);
        }

        info!("Found {} image files to compress", files.len());

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

    async fn process_file(&self, path: &Path) -> Result<FileOutcome, PrepError> {
        let original_bytes = tokio::fs::metadata(path).await?.len();
        let original_mb = original_bytes as f64 / BYTES_PER_MB;

        if original_mb < self.config.min_size_mb {
            return Ok(FileOutcome {
                path: path.to_path_buf(),
                original_bytes,
                final_bytes: original_bytes,
                changed: false,
            });
        }

        let params = EncodeParams::for_path(path, self.config.quality)?;
        codec::reencode_in_place(path, params)?;

        let final_bytes = tokio::fs::metadata(path).await?.len();
        Ok(FileOutcome {
            path: path.to_path_buf(),
            original_bytes,
            final_bytes,
            changed: true,
        })
    }

    fn report_file(&self, path: &Path, result: &Result<FileOutcome, PrepError>) {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            Ok(outcome) if outcome.changed => info!(
                "{}: {} -> {} ({:.1}% reduction)",
                name,
                FileManager::format_size(outcome.original_bytes),
                FileManager::format_size(outcome.final_bytes),
                FileManager::calculate_reduction(outcome.original_bytes, outcome.final_bytes)
            ),
            Ok(outcome) => info!(
                "{}: {} below {}MB threshold, skipped",
                name,
                FileManager::format_size(outcome.original_bytes),
                self.config.min_size_mb
            ),
            Err(e) => error!("{}: {}", name, e),
        }
    }
}
