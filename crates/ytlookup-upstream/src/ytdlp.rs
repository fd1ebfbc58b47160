//! Direct stream resolution using yt-dlp.
//!
//! yt-dlp is run in metadata mode (`-J --skip-download`); its JSON
//! description of the available formats is filtered and ranked here.

use std::cmp::Ordering;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, warn};
use ytlookup_models::download::estimate_size_bytes;
use ytlookup_models::{bytes_to_human, DownloadCandidate, DownloadCandidates, DownloadFormat, Thumbnail};

use crate::config::UpstreamConfig;
use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics::record_request;
use crate::traits::DownloadResolver;

/// Codec value yt-dlp uses for an absent stream.
const NO_CODEC: &str = "none";

// =============================================================================
// yt-dlp JSON
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct YtDlpInfo {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    thumbnails: Vec<YtDlpThumbnail>,
    #[serde(default)]
    formats: Vec<YtDlpFormat>,
}

#[derive(Debug, Deserialize)]
struct YtDlpThumbnail {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct YtDlpFormat {
    #[serde(default)]
    format_id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    tbr: Option<f64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    vbr: Option<f64>,
    #[serde(default)]
    filesize: Option<u64>,
    #[serde(default)]
    filesize_approx: Option<u64>,
    #[serde(default)]
    format_note: Option<String>,
    #[serde(default)]
    height: Option<u32>,
}

fn has_codec(codec: &Option<String>) -> bool {
    codec
        .as_deref()
        .map(|c| !c.is_empty() && c != NO_CODEC)
        .unwrap_or(false)
}

impl YtDlpFormat {
    fn is_audio_only(&self) -> bool {
        has_codec(&self.acodec) && !has_codec(&self.vcodec)
    }

    fn has_video(&self) -> bool {
        has_codec(&self.vcodec)
    }

    fn matches(&self, format: DownloadFormat) -> bool {
        match format {
            DownloadFormat::Mp3 => self.is_audio_only(),
            DownloadFormat::Mp4 => self.has_video(),
        }
    }

    /// Total bitrate in kbit/s, 0 when unknown.
    fn bitrate_kbps(&self) -> f64 {
        self.tbr.or(self.abr).or(self.vbr).unwrap_or(0.0)
    }

    fn mime_type(&self) -> String {
        let kind = if self.has_video() { "video" } else { "audio" };
        let ext = self.ext.as_deref().unwrap_or("unknown");
        let codecs: Vec<&str> = [&self.vcodec, &self.acodec]
            .into_iter()
            .filter(|c| has_codec(c))
            .filter_map(|c| c.as_deref())
            .collect();

        if codecs.is_empty() {
            format!("{}/{}", kind, ext)
        } else {
            format!("{}/{}; codecs=\"{}\"", kind, ext, codecs.join(", "))
        }
    }

    fn quality_label(&self) -> Option<String> {
        if let Some(note) = self.format_note.as_deref().filter(|n| !n.is_empty()) {
            return Some(note.to_string());
        }
        if self.has_video() {
            self.height.map(|h| format!("{}p", h))
        } else {
            self.abr.map(|abr| format!("{}kbps", abr.round() as u64))
        }
    }

    fn into_candidate(self, length_seconds: u64) -> Option<DownloadCandidate> {
        let estimated_size_bytes = self
            .filesize
            .or(self.filesize_approx)
            .or_else(|| estimate_size_bytes(self.bitrate_kbps(), length_seconds));

        Some(DownloadCandidate {
            mime_type: self.mime_type(),
            quality_label: self.quality_label(),
            estimated_size_human: bytes_to_human(estimated_size_bytes),
            estimated_size_bytes,
            itag: self.format_id,
            url: self.url.filter(|u| !u.is_empty())?,
        })
    }
}

/// Filter, rank and summarize the formats of one yt-dlp info document.
fn build_candidates(info: YtDlpInfo, format: DownloadFormat) -> DownloadCandidates {
    let length_seconds = info.duration.map(|d| d.max(0.0).round() as u64).unwrap_or(0);

    let mut formats: Vec<YtDlpFormat> = info
        .formats
        .into_iter()
        .filter(|f| f.matches(format))
        .filter(|f| f.url.as_deref().map(|u| !u.is_empty()).unwrap_or(false))
        .collect();
    formats.sort_by(|a, b| {
        b.bitrate_kbps()
            .partial_cmp(&a.bitrate_kbps())
            .unwrap_or(Ordering::Equal)
    });

    let ranked: Vec<DownloadCandidate> = formats
        .into_iter()
        .filter_map(|f| f.into_candidate(length_seconds))
        .collect();

    let thumbnails = info
        .thumbnails
        .into_iter()
        .map(|t| Thumbnail {
            url: t.url,
            width: t.width,
            height: t.height,
        })
        .collect();

    DownloadCandidates::from_ranked(
        info.id,
        info.title.unwrap_or_default(),
        length_seconds,
        thumbnails,
        ranked,
    )
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves direct stream URLs by running yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    binary: String,
    timeout: Duration,
}

impl YtDlpResolver {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.ytdlp_path.clone(), config.ytdlp_timeout)
    }

    async fn dump_json(&self, url: &str) -> UpstreamResult<Vec<u8>> {
        let binary = which::which(&self.binary).map_err(|_| UpstreamError::ToolNotFound)?;

        let mut command = Command::new(binary);
        command
            .args(["-J", "--no-warnings", "--skip-download", "--no-playlist", "--"])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                warn!(url = %url, timeout_secs = self.timeout.as_secs(), "yt-dlp timed out");
                UpstreamError::Timeout(self.timeout.as_secs())
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            let error_msg = stderr.lines().last().unwrap_or("Unknown error");
            return Err(UpstreamError::ToolFailed(error_msg.to_string()));
        }

        Ok(output.stdout)
    }

    async fn resolve_once(&self, url: &str, format: DownloadFormat) -> UpstreamResult<DownloadCandidates> {
        let stdout = self.dump_json(url).await?;
        let info: YtDlpInfo = serde_json::from_slice(&stdout)?;
        Ok(build_candidates(info, format))
    }
}

#[async_trait]
impl DownloadResolver for YtDlpResolver {
    async fn resolve(&self, url: &str, format: DownloadFormat) -> UpstreamResult<DownloadCandidates> {
        let start = std::time::Instant::now();
        let result = self.resolve_once(url, format).await;

        let status = match &result {
            Ok(_) => 200,
            Err(_) => 500,
        };
        record_request("resolve_downloads", status, start.elapsed().as_millis() as f64);

        if let Ok(candidates) = &result {
            info!(
                video_id = %candidates.id,
                format = %format.as_str(),
                candidates = candidates.all_candidates_count,
                "Resolved download candidates"
            );
        }
        result
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }
}
