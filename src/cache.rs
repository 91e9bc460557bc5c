//! Per-session issue cache.
//!
//! Deduplicates lookups across the whole run: at most one fetch attempt is
//! made per distinct reference, no matter how many tests mention it. The
//! cache is populated during collection and read-only during execution.

use std::collections::BTreeMap;

use crate::issue::Issue;
use crate::reference::{self, MalformedRefError};
use crate::tracker::IssueTracker;
use crate::warnings::WarningSink;

/// Maps issue reference URLs to fetched snapshots.
///
/// An entry holding `None` marks a reference whose lookup failed; it stays
/// excluded from resolution for the rest of the session.
#[derive(Debug, Default)]
pub struct IssueCache {
    entries: BTreeMap<String, Option<Issue>>,
}

impl IssueCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a reference has been looked up, fetching on first sight.
    ///
    /// A fetch failure is downgraded to a warning naming the unreachable
    /// reference and recorded as an absent entry; later calls for the same
    /// reference return without a new fetch.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRefError`] when the reference does not parse.
    pub fn populate(
        &mut self,
        url: &str,
        tracker: &dyn IssueTracker,
        warnings: &mut WarningSink,
    ) -> Result<(), MalformedRefError> {
        if self.entries.contains_key(url) {
            return Ok(());
        }
        let parsed = reference::parse(url)?;
        tracing::debug!(%url, "looking up issue");
        let entry = match tracker.fetch_issue(&parsed.owner, &parsed.repo, parsed.number) {
            Ok(remote) => Some(Issue::from(remote)),
            Err(err) => {
                warnings.warn(format!("Unable to inspect github issue {url} - {err}"));
                None
            }
        };
        self.entries.insert(url.to_string(), entry);
        Ok(())
    }

    /// Returns the cached snapshot for a reference, if its lookup succeeded.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Issue> {
        self.entries.get(url).and_then(Option::as_ref)
    }

    /// Number of distinct references seen, including failed lookups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no reference has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
