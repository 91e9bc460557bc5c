//! Normalized issue snapshots.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::tracker::RemoteIssue;

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    /// The issue is still open in the tracker.
    Open,
    /// The issue has been closed.
    Closed,
}

impl IssueState {
    /// Lowercase state name as rendered in reasons and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A point-in-time snapshot of a tracked issue.
///
/// Fetched once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Browser URL for the issue.
    pub url: String,
    /// Issue title.
    pub title: String,
    /// Open or closed.
    pub state: IssueState,
    /// Normalized label names.
    pub labels: BTreeSet<String>,
    /// When the issue was closed, if it has been.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Returns `true` when the issue is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Returns `true` when the issue counts as resolved: closed, or open
    /// but carrying one of the configured completed labels.
    #[must_use]
    pub fn is_resolved(&self, completed_labels: &BTreeSet<String>) -> bool {
        self.is_closed() || !self.labels.is_disjoint(completed_labels)
    }
}

impl From<RemoteIssue> for Issue {
    /// Normalizes the tracker wire shape into a snapshot.
    ///
    /// The single point where label objects collapse to plain names and
    /// the free-form state string becomes an enum; tracker client quirks
    /// stay behind this conversion.
    fn from(remote: RemoteIssue) -> Self {
        let state = if remote.state.eq_ignore_ascii_case("closed") {
            IssueState::Closed
        } else {
            IssueState::Open
        };
        Self {
            url: remote.html_url,
            title: remote.title,
            state,
            labels: remote.labels.into_iter().map(|label| label.name).collect(),
            closed_at: remote.closed_at,
        }
    }
}
