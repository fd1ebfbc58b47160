//! Health check handlers.

use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

const HISTORY_LOCK_TIMEOUT: Duration = Duration::from_secs(1);

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub history: CheckStatus,
    pub api_key: CheckStatus,
    pub ytdlp: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl CheckStatus {
    fn ok(latency_ms: u64) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            latency_ms: Some(latency_ms),
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(msg.into()),
            latency_ms: None,
        }
    }

    /// Not required for readiness, but worth reporting.
    fn warn(msg: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            error: Some(msg.into()),
            latency_ms: None,
        }
    }
}

/// Readiness check.
///
/// The history store is required. A missing server key or yt-dlp binary
/// only disables some endpoints and is reported as a warning.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let history_check = {
        let start = Instant::now();
        match tokio::time::timeout(HISTORY_LOCK_TIMEOUT, state.history.len()).await {
            Ok(_) => CheckStatus::ok(start.elapsed().as_millis() as u64),
            Err(_) => CheckStatus::error("history store busy"),
        }
    };

    let api_key_check = if state.config.rapidapi_key.is_some() {
        CheckStatus::ok(0)
    } else {
        CheckStatus::warn("RAPIDAPI_KEY not set; clients must send their own key")
    };

    let ytdlp_check = {
        let start = Instant::now();
        if state.downloads.is_available() {
            CheckStatus::ok(start.elapsed().as_millis() as u64)
        } else {
            CheckStatus::warn("yt-dlp not found; download URL resolution unavailable")
        }
    };

    let history_ok = history_check.status == "ok";
    let all_ok = history_ok && api_key_check.status == "ok" && ytdlp_check.status == "ok";

    let status = match (history_ok, all_ok) {
        (false, _) => "not_ready",
        (true, false) => "degraded",
        (true, true) => "ready",
    };

    let response = ReadinessResponse {
        status: status.to_string(),
        checks: ReadinessChecks {
            history: history_check,
            api_key: api_key_check,
            ytdlp: ytdlp_check,
        },
    };

    if history_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
