//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::application::dto::{BoardSnapshotDto, LoadStatusDto};

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Market list loaded, or still loading.
    Healthy,
    /// Market fetch failed; the board is usable but has no fresh data.
    Degraded,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Service version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Market fetch progress.
    pub load: LoadStatusDto,
}

/// Response to a pager action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateResponse {
    /// Whether the action was enabled and applied.
    pub applied: bool,
    /// Board after the action.
    #[serde(flatten)]
    pub snapshot: BoardSnapshotDto,
}
