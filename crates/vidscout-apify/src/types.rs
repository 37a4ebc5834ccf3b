//! Apify REST API wire types.
//!
//! Every Apify v2 endpoint that returns a single object wraps it as
//! `{"data": {...}}`; [`ApiResponse`] captures that envelope. Dataset items
//! are returned as a bare JSON array and stay loosely typed
//! (`serde_json::Value`) because the actor's output shape is not guaranteed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope for single-object Apify responses.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Job input for the video/profile scraper actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInput {
    /// Upper bound on dataset items the run may produce.
    pub max_items: usize,
    pub usernames: Vec<String>,
    pub results_per_page: usize,
}

impl CollectionInput {
    /// Builds the input for one batch: capacity is `len × per_identity + slack`.
    #[must_use]
    pub fn for_batch(usernames: Vec<String>, per_identity: usize, slack: usize) -> Self {
        let max_items = usernames
            .len()
            .saturating_mul(per_identity)
            .saturating_add(slack);
        Self {
            max_items,
            usernames,
            results_per_page: per_identity,
        }
    }
}

/// Lifecycle state of an actor run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    TimingOut,
    TimedOut,
    Aborting,
    Aborted,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Aborted
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::TimingOut => "TIMING-OUT",
            Self::TimedOut => "TIMED-OUT",
            Self::Aborting => "ABORTING",
            Self::Aborted => "ABORTED",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Run metadata returned by the start and poll endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunData {
    pub id: String,
    pub status: RunStatus,
    pub default_dataset_id: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}
