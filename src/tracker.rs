//! Issue tracker port: the boundary to the remote tracker API.
//!
//! Abstracting the tracker allows deterministic testing without touching a
//! real API. Implementations live in [`crate::github`] (live) and in test
//! doubles.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Label attached to a remote issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteLabel {
    /// The label name.
    pub name: String,
}

/// An issue as reported by the tracker API.
///
/// This is the wire shape; [`crate::issue::Issue`] is the normalized
/// snapshot the rest of the crate works with.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    /// Issue or pull request number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Browser URL for the issue.
    pub html_url: String,
    /// Tracker-reported state, `"open"` or `"closed"`.
    pub state: String,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    /// When the issue was closed, if it has been.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// Errors reported by a tracker client.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Authentication or client initialization failure.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The issue does not exist or is not visible to the credentials in use.
    #[error("issue not found")]
    NotFound,
    /// The API rate limit was exhausted.
    #[error("rate limit exceeded")]
    RateLimit,
    /// Any other client-reported failure.
    #[error("API request failed: {0}")]
    Api(String),
}

/// Fetches issues from a remote tracker.
///
/// Lookups are read-only and independent. The cache guarantees each
/// distinct reference is fetched at most once per session.
pub trait IssueTracker: Send + Sync {
    /// Fetches a single issue.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError`] when the issue cannot be retrieved; the
    /// caller records a warning and excludes the reference from resolution.
    fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<RemoteIssue, TrackerError>;
}
