//! # Image Resize Orchestration
//!
//! Questo modulo orchestra la normalizzazione delle dimensioni per file e
//! directory: legge le dimensioni, decide tramite [`crate::dimensions`], e
//! solo se serve invoca resample + re-encode.
//!
//! ## Responsabilità:
//! - Dispatch file singolo vs directory
//! - Un file alla volta: read -> decide -> (eventuale) resize -> report
//! - Un file `changed = false` non viene mai ri-encodato: resta
//!   byte-identico su disco (nessuna generation loss)
//! - Gli errori per-file vengono loggati e il loop continua

use crate::codec::{self, EncodeParams};
use crate::config::ResizeConfig;
use crate::dimensions::normalize;
use crate::error::PrepError;
use crate::file_manager::{FileManager, IMAGE_EXTENSIONS};
use crate::progress::{FileOutcome, ProgressManager, RunSummary};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// Resizes images to multiple-of-4 dimensions within the 4K cap
pub struct ImageResizer {
    config: ResizeConfig,
}

impl ImageResizer {
    pub fn new(config: ResizeConfig) -> Self {
        Self { config }
    }

    /// Process a file or a directory tree. Directory runs absorb per-file
    /// failures into the summary; validation problems are returned.
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

        info!("Resizing single file: {}", path.display());
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

        info!(
            "Found {} image files to process (max dimension: {}px, target: divisible by 4)",
            files.len(),
            self.config.max_dimension
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

    /// Read dimensions, decide, and rewrite the file only when needed.
    async fn process_file(&self, path: &Path) -> Result<FileOutcome, PrepError> {
        let original_bytes = tokio::fs::metadata(path).await?.len();
        let dims = codec::read_dimensions(path)?;
        let decision = normalize(dims.width, dims.height, self.config.max_dimension);

        if !decision.changed {
            return Ok(FileOutcome {
                path: path.to_path_buf(),
                original_bytes,
                final_bytes: original_bytes,
                changed: false,
            });
        }

        info!(
            "{}: {} -> {}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            dims,
            decision.target
        );

        let params = EncodeParams::for_path(path, self.config.quality)?;
        codec::resize_in_place(path, decision.target, params)?;

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
                "{}: {} -> {} ({:+.1}%)",
                name,
                FileManager::format_size(outcome.original_bytes),
                FileManager::format_size(outcome.final_bytes),
                FileManager::size_change_percent(outcome.original_bytes, outcome.final_bytes)
            ),
            Ok(_) => info!("{}: already optimal, skipped", name),
            Err(e) => error!("{}: {}", name, e),
        }
    }
}
