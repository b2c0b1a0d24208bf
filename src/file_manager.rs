//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file e le utilità sulle dimensioni.
//!
//! ## Responsabilità:
//! - Discovery di file candidati in una directory (ricorsiva o top-level)
//! - Match delle estensioni case-insensitive (.jpg e .JPG sono equivalenti)
//! - Ordinamento deterministico dei risultati
//! - Formattazione human-readable delle dimensioni (KB, MB, GB)
//!
//! ## Set di estensioni:
//! - **Immagini**: PNG, JPG, JPEG
//! - **Audio (input conversione)**: MP3, WAV, OGG, M4A, AAC, FLAC
//! - **Audio (input trascrizione)**: MP3

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions handled by the image utilities
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extensions accepted as audio conversion input
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac", "flac"];

/// Extensions accepted as transcription input
pub const TRANSCRIBE_EXTENSIONS: &[&str] = &["mp3"];

/// Manages file discovery and size formatting
pub struct FileManager;

impl FileManager {
    /// Find all files under `root` whose extension matches `extensions`
    /// (case-insensitive). With `recursive = false` only the top level is
    /// scanned. Results are sorted for a deterministic processing order.
    pub fn find_files(root: &Path, extensions: &[&str], recursive: bool) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(root);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| Self::has_extension(p, extensions))
            .collect();

        files.sort();
        files
    }

    /// Check whether a path carries one of the given extensions,
    /// ignoring case.
    pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                extensions.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Percentage reduction (positive = smaller)
    pub fn calculate_reduction(original: u64, new: u64) -> f64 {
        -Self::size_change_percent(original, new)
    }

    /// Signed size change in percent (negative = smaller)
    pub fn size_change_percent(original: u64, new: u64) -> f64 {
        if original == 0 {
            0.0
        } else {
            ((new as f64 - original as f64) / original as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_find_files_filters_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("b.txt"));
        touch(&tmp.path().join("c.png"));

        let files = FileManager::find_files(tmp.path(), IMAGE_EXTENSIONS, true);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_files_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.JPG"));
        touch(&tmp.path().join("b.Png"));
        touch(&tmp.path().join("c.JPEG"));

        let files = FileManager::find_files(tmp.path(), IMAGE_EXTENSIONS, true);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_find_files_non_recursive() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("top.jpg"));
        fs::create_dir(tmp.path().join("sub")).unwrap();
        touch(&tmp.path().join("sub").join("nested.jpg"));

        let recursive = FileManager::find_files(tmp.path(), IMAGE_EXTENSIONS, true);
        assert_eq!(recursive.len(), 2);

        let top_only = FileManager::find_files(tmp.path(), IMAGE_EXTENSIONS, false);
        assert_eq!(top_only.len(), 1);
        assert!(top_only[0].ends_with("top.jpg"));
    }

    #[test]
    fn test_find_files_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("z.jpg"));
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("m.jpg"));

        let files = FileManager::find_files(tmp.path(), IMAGE_EXTENSIONS, true);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "m.jpg", "z.jpg"]);
    }

    #[test]
    fn test_has_extension_no_extension() {
        assert!(!FileManager::has_extension(
            Path::new("Makefile"),
            IMAGE_EXTENSIONS
        ));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(100, 75), 25.0);
        assert_eq!(FileManager::calculate_reduction(100, 100), 0.0);
    }

    #[test]
    fn test_size_change_percent() {
        assert_eq!(FileManager::size_change_percent(100, 50), -50.0);
        assert_eq!(FileManager::size_change_percent(100, 150), 50.0);
        assert_eq!(FileManager::size_change_percent(0, 10), 0.0);
    }
}
