//! # SRT Subtitle Module
//!
//! Questo modulo formatta e scrive file SRT a partire dai segmenti di
//! trascrizione.
//!
//! ## Formato SRT:
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:02,500
//! Testo del primo segmento
//!
//! 2
//! ...
//! ```
//!
//! I timestamp usano aritmetica sui millisecondi totali, quindi niente
//! sorprese di arrotondamento tra i campi ore/minuti/secondi.

use crate::error::PrepError;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// One transcribed span of speech
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    pub text: String,
}

/// Render segments to SRT and write the file.
pub async fn write_srt(segments: &[Segment], output_path: &Path) -> Result<(), PrepError> {
    fs::write(output_path, render_srt(segments)).await?;
    info!("Generated {}", output_path.display());
    Ok(())
}

/// Render segments as SRT text: 1-based index, timestamp range, trimmed
/// text, blank separator line.
pub fn render_srt(segments: &[Segment]) -> String {
    let mut srt = String::new();
    for (index, segment) in segments.iter().enumerate() {
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            format_srt_time(segment.start),
            format_srt_time(segment.end),
            segment.text.trim()
        ));
    }
    srt
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm)
fn format_srt_time(seconds: f64) -> String {
    let total_milliseconds = (seconds * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(65.123), "00:01:05,123");
        assert_eq!(format_srt_time(3661.500), "01:01:01,500");
        assert_eq!(format_srt_time(7322.007), "02:02:02,007");
    }

    #[test]
    fn test_render_srt_layout() {
        let segments = vec![
            Segment {
                start: 0.0,
                end: 2.5,
                text: "  Hello there.  ".to_string(),
            },
            Segment {
                start: 2.5,
                end: 5.0,
                text: "Second line".to_string(),
            },
        ];

        let srt = render_srt(&segments);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:02,500\nHello there.\n\n\
             2\n00:00:02,500 --> 00:00:05,000\nSecond line\n\n"
        );
    }

    #[test]
    fn test_render_empty_segments() {
        assert_eq!(render_srt(&[]), "");
    }

    #[tokio::test]
    async fn test_write_srt_to_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.srt");
        let segments = vec![Segment {
            start: 1.0,
            end: 2.0,
            text: "hi".to_string(),
        }];

        write_srt(&segments, &path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("1\n00:00:01,000 --> 00:00:02,000\nhi\n"));
        assert!(content.ends_with("\n\n"));
    }
}
