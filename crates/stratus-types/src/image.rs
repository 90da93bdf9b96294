use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an image-builder pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStatus {
    BuildInProgress,
    BuildComplete,
    BuildFailed,
    DeleteInProgress,
    DeleteFailed,
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageStatus::BuildInProgress => "BUILD_IN_PROGRESS",
            ImageStatus::BuildComplete => "BUILD_COMPLETE",
            ImageStatus::BuildFailed => "BUILD_FAILED",
            ImageStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            ImageStatus::DeleteFailed => "DELETE_FAILED",
        };
        f.write_str(s)
    }
}

/// One row of `stratus list-images`, also the payload of `describe-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    pub name: String,
    pub image_id: Option<String>,
    pub status: ImageStatus,
    pub version: String,
    pub created_at: Option<DateTime<Utc>>,
}
