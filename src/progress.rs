//! # Progress Tracking and Run Summary Module
//!
//! Questo modulo gestisce il progress tracking e il riepilogo del run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Accumulo esplicito degli esiti per-file in `RunSummary`
//! - Report finale con conteggi e byte prima/dopo
//!
//! ## Modello di accumulo:
//! L'esito di ogni file è un `Result<FileOutcome, PrepError>`: il loop di
//! orchestrazione fa pattern-matching e piega il risultato dentro il
//! `RunSummary` (nessuno stato globale mutabile). I totali in byte crescono
//! soltanto, mai decrementati.
//!
//! ## Esiti tracciati:
//! - **changed**: file riscritto su disco (contribuisce ai totali byte)
//! - **skipped**: nessuna modifica necessaria, file lasciato byte-identico
//! - **failed**: errore per-file, loggato, il run continua

use crate::error::PrepError;
use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Manages progress reporting for directory runs
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// The result of processing one file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub original_bytes: u64,
    pub final_bytes: u64,
    /// True iff the file was rewritten on disk
    pub changed: bool,
}

/// Aggregated outcomes of a run, threaded through the processing loop
#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub changed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_original_bytes: u64,
    pub total_final_bytes: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one per-file result into the summary. Byte totals accumulate
    /// only for files that were actually rewritten, matching what the
    /// final report compares.
    pub fn record(&mut self, result: &Result<FileOutcome, PrepError>) {
        self.processed += 1;
        match result {
            Ok(outcome) if outcome.changed => {
                self.changed += 1;
                self.total_original_bytes += outcome.original_bytes;
                self.total_final_bytes += outcome.final_bytes;
            }
            Ok(_) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Signed overall size change in percent across rewritten files
    pub fn overall_change_percent(&self) -> f64 {
        FileManager::size_change_percent(self.total_original_bytes, self.total_final_bytes)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Changed: {} | Skipped: {} | Failed: {} | {} -> {} ({:+.1}%)",
            self.processed,
            self.changed,
            self.skipped,
            self.failed,
            FileManager::format_size(self.total_original_bytes),
            FileManager::format_size(self.total_final_bytes),
            self.overall_change_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(original: u64, fin: u64, changed: bool) -> Result<FileOutcome, PrepError> {
        Ok(FileOutcome {
            path: PathBuf::from("test.jpg"),
            original_bytes: original,
            final_bytes: fin,
            changed,
        })
    }

    #[test]
    fn test_record_changed() {
        let mut summary = RunSummary::new();
        summary.record(&outcome(1000, 400, true));
        summary.record(&outcome(2000, 1600, true));

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.changed, 2);
        assert_eq!(summary.total_original_bytes, 3000);
        assert_eq!(summary.total_final_bytes, 2000);
    }

    #[test]
    fn test_record_skipped_does_not_touch_totals() {
        let mut summary = RunSummary::new();
        summary.record(&outcome(1000, 1000, false));

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total_original_bytes, 0);
        assert_eq!(summary.total_final_bytes, 0);
    }

    #[test]
    fn test_record_failure() {
        let mut summary = RunSummary::new();
        summary.record(&Err(PrepError::Ffmpeg("boom".to_string())));

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.changed, 0);
    }

    #[test]
    fn test_overall_change_percent() {
        let mut summary = RunSummary::new();
        summary.record(&outcome(200, 100, true));
        assert_eq!(summary.overall_change_percent(), -50.0);
    }
}
