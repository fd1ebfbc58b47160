//! Lookup history models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::caption::CaptionTrack;
use crate::video::VideoDetails;

/// The most recent lookup of a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Video ID (history key)
    pub id: String,

    /// Details returned by the lookup
    pub details: VideoDetails,

    /// URL or ID the user submitted
    pub url: String,

    /// Caption tracks known at lookup time
    #[serde(default)]
    pub captions: Vec<CaptionTrack>,

    /// When the lookup happened
    pub queried_at: DateTime<Utc>,
}

impl HistoryItem {
    /// Create an entry stamped with the current time.
    pub fn new(details: VideoDetails, url: impl Into<String>) -> Self {
        Self {
            id: details.id.clone(),
            details,
            url: url.into(),
            captions: Vec::new(),
            queried_at: Utc::now(),
        }
    }

    /// Attach caption tracks.
    pub fn with_captions(mut self, captions: Vec<CaptionTrack>) -> Self {
        self.captions = captions;
        self
    }
}
