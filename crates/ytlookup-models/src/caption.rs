//! Caption models and text formatting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Text returned when a caption track has no segments.
pub const NO_CAPTIONS_TEXT: &str = "No captions available";

/// An available caption track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Human readable language name
    pub lang: String,
    /// Language code used to request the track
    pub code: String,
    /// Whether the track is auto-generated
    #[serde(default)]
    pub is_auto_generated: bool,
}

/// Caption track listing for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaptionList {
    pub captions: Vec<CaptionTrack>,
    pub count: usize,
}

impl From<Vec<CaptionTrack>> for CaptionList {
    fn from(captions: Vec<CaptionTrack>) -> Self {
        Self {
            count: captions.len(),
            captions,
        }
    }
}

/// A timed caption segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaptionSegment {
    pub text: String,
    /// Start offset in seconds
    #[serde(default)]
    pub start: f64,
    /// Duration in seconds
    #[serde(default, alias = "dur")]
    pub duration: f64,
}

/// Render caption segments as plain text, one segment per line.
///
/// With `with_timestamp`, each line is prefixed with `[MM:SS]`.
pub fn format_captions(segments: &[CaptionSegment], with_timestamp: bool) -> String {
    if segments.is_empty() {
        return NO_CAPTIONS_TEXT.to_string();
    }

    segments
        .iter()
        .map(|segment| {
            let text = segment.text.trim();
            if with_timestamp {
                format!("[{}] {}", format_timestamp(segment.start), text)
            } else {
                text.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `MM:SS` with zero padding; minutes are not wrapped into hours.
fn format_timestamp(start: f64) -> String {
    let total = if start.is_finite() && start > 0.0 {
        start.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
