//! Download candidate and MP3 conversion models.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::Thumbnail;

/// Number of candidates returned as "best".
pub const BEST_CANDIDATES_LIMIT: usize = 5;

/// Label used when a size cannot be estimated.
pub const UNKNOWN_SIZE: &str = "unknown";

/// Requested download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    /// Audio-only streams
    Mp3,
    /// Streams carrying video
    #[default]
    Mp4,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadFormat::Mp3 => "mp3",
            DownloadFormat::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" | "audio" => Ok(DownloadFormat::Mp3),
            "mp4" | "video" => Ok(DownloadFormat::Mp4),
            other => Err(format!("Unsupported download format: {}", other)),
        }
    }
}

/// A single downloadable stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadCandidate {
    /// Format identifier (YouTube itag)
    pub itag: String,
    pub mime_type: String,
    pub quality_label: Option<String>,
    pub url: String,
    pub estimated_size_bytes: Option<u64>,
    pub estimated_size_human: String,
}

/// Ranked download candidates for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadCandidates {
    pub id: String,
    pub title: String,
    pub length_seconds: u64,
    pub thumbnails: Vec<Thumbnail>,
    pub best_candidates: Vec<DownloadCandidate>,
    pub all_candidates_count: usize,
}

impl DownloadCandidates {
    /// Build from a full, already ranked candidate list.
    pub fn from_ranked(
        id: String,
        title: String,
        length_seconds: u64,
        thumbnails: Vec<Thumbnail>,
        mut ranked: Vec<DownloadCandidate>,
    ) -> Self {
        let all_candidates_count = ranked.len();
        ranked.truncate(BEST_CANDIDATES_LIMIT);
        Self {
            id,
            title,
            length_seconds,
            thumbnails,
            best_candidates: ranked,
            all_candidates_count,
        }
    }
}

/// Estimate a stream size from bitrate (kbit/s) and duration.
pub fn estimate_size_bytes(bitrate_kbps: f64, length_seconds: u64) -> Option<u64> {
    if bitrate_kbps <= 0.0 || length_seconds == 0 {
        return None;
    }
    Some(((bitrate_kbps * 1000.0 * length_seconds as f64) / 8.0).round() as u64)
}

/// Human readable size with base-1024 units and two decimals.
pub fn bytes_to_human(bytes: Option<u64>) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return UNKNOWN_SIZE.to_string();
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Status of an MP3 conversion job reported by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mp3Status {
    /// Converter status (`ok`, `processing`, `fail`, ...)
    pub status: String,
    pub link: String,
    pub title: Option<String>,
    pub progress: Option<f64>,
    pub duration: Option<f64>,
    pub msg: Option<String>,
    /// Best available download link
    pub download_url: String,
}

impl Mp3Status {
    /// True once a download link is available.
    pub fn is_ready(&self) -> bool {
        !self.download_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_human() {
        assert_eq!(bytes_to_human(None), UNKNOWN_SIZE);
        assert_eq!(bytes_to_human(Some(0)), UNKNOWN_SIZE);
        assert_eq!(bytes_to_human(Some(512)), "512.00 B");
        assert_eq!(bytes_to_human(Some(1536)), "1.50 KB");
        assert_eq!(bytes_to_human(Some(5 * 1024 * 1024)), "5.00 MB");
        assert_eq!(bytes_to_human(Some(3 * 1024u64.pow(4) * 1024)), "3072.00 TB");
    }

    #[test]
    fn test_estimate_size() {
        // 128 kbit/s for 60s = 960000 bytes
        assert_eq!(estimate_size_bytes(128.0, 60), Some(960_000));
        assert_eq!(estimate_size_bytes(0.0, 60), None);
        assert_eq!(estimate_size_bytes(128.0, 0), None);
    }

    #[test]
    fn test_download_format_from_str() {
        assert_eq!("MP3".parse::<DownloadFormat>().unwrap(), DownloadFormat::Mp3);
        assert_eq!("mp4".parse::<DownloadFormat>().unwrap(), DownloadFormat::Mp4);
        assert!("flac".parse::<DownloadFormat>().is_err());
    }

    #[test]
    fn test_from_ranked_keeps_top_five() {
        let candidates: Vec<_> = (0..8)
            .map(|i| DownloadCandidate {
                itag: i.to_string(),
                mime_type: "audio/webm".to_string(),
                quality_label: None,
                url: format!("https://example.com/{i}"),
                estimated_size_bytes: None,
                estimated_size_human: UNKNOWN_SIZE.to_string(),
            })
            .collect();
        let result = DownloadCandidates::from_ranked(
            "id".to_string(),
            "title".to_string(),
            10,
            vec![],
            candidates,
        );
        assert_eq!(result.best_candidates.len(), BEST_CANDIDATES_LIMIT);
        assert_eq!(result.all_candidates_count, 8);
        assert_eq!(result.best_candidates[0].itag, "0");
    }
}
