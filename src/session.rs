//! Run-scoped orchestration.
//!
//! One [`Session`] owns the resolved configuration, the issue cache, the
//! warning sink, and the tracker port for a single test run. The two hooks
//! mirror the host framework's lifecycle: [`Session::collect`] runs after
//! collection and before any test body, [`Session::setup`] immediately
//! before each body.

use std::collections::BTreeMap;

use crate::cache::IssueCache;
use crate::config::GithubConfig;
use crate::reference::MalformedRefError;
use crate::resolve::{self, Disposition};
use crate::runner::TestCase;
use crate::tracker::IssueTracker;
use crate::warnings::WarningSink;

/// State for one test run.
pub struct Session {
    config: GithubConfig,
    cache: IssueCache,
    warnings: WarningSink,
    tracker: Box<dyn IssueTracker>,
}

impl Session {
    /// Creates a session from an already-resolved configuration.
    ///
    /// The warning sink carries over whatever configuration resolution
    /// recorded, so one channel accumulates the whole run's warnings.
    #[must_use]
    pub fn new(config: GithubConfig, tracker: Box<dyn IssueTracker>, warnings: WarningSink) -> Self {
        Self { config, cache: IssueCache::new(), warnings, tracker }
    }

    /// Post-collection hook: looks up every reference bound to any case.
    ///
    /// Returns, keyed by case index, the malformed-reference error that
    /// case's setup must report. A malformed reference poisons only the
    /// cases that declare it; collection continues for everything else.
    pub fn collect(&mut self, cases: &[TestCase]) -> BTreeMap<usize, MalformedRefError> {
        let mut errors = BTreeMap::new();
        for (index, case) in cases.iter().enumerate() {
            let Some(binding) = &case.binding else { continue };
            for url in binding.refs() {
                match self.cache.populate(url, self.tracker.as_ref(), &mut self.warnings) {
                    Ok(()) => {}
                    Err(err) => {
                        errors.insert(index, err);
                        break;
                    }
                }
            }
        }
        tracing::debug!(issues = self.cache.len(), "collected github issues");
        errors
    }

    /// Pre-test hook: computes the disposition for one case.
    #[must_use]
    pub fn setup(&self, case: &TestCase) -> Disposition {
        match &case.binding {
            Some(binding) => resolve::resolve(
                binding,
                case.param_id.as_deref(),
                &self.cache,
                &self.config.completed_labels,
            ),
            None => Disposition::Proceed,
        }
    }

    /// Read-only view of the issue cache.
    #[must_use]
    pub fn cache(&self) -> &IssueCache {
        &self.cache
    }

    /// Warnings recorded so far, in order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        self.warnings.entries()
    }

    /// Consumes the session, returning the accumulated warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings.into_entries()
    }
}
