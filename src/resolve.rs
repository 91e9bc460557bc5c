//! Resolution engine: decides a test's disposition from its bound issues.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::binding::IssueBinding;
use crate::cache::IssueCache;
use crate::issue::Issue;

/// What the harness should do with a test before its body runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Run the test normally.
    Proceed,
    /// Run the test, absorbing an anticipated failure.
    ExpectedFailure {
        /// Human-readable enumeration of the unresolved issues.
        reason: String,
        /// When set, only failures of this kind are absorbed.
        raises: Option<String>,
    },
    /// Do not run the test at all.
    Skip {
        /// Human-readable enumeration of the unresolved issues.
        reason: String,
    },
}

/// Computes the disposition for one test instance.
///
/// Pure function of the binding and the cache snapshot. References without
/// a cache entry contribute nothing to the decision; an issue counts as
/// resolved when it is closed or carries a completed label; any remaining
/// unresolved issue turns the disposition into a skip (when the binding
/// says so) or an expected failure.
#[must_use]
pub fn resolve(
    binding: &IssueBinding,
    param_id: Option<&str>,
    cache: &IssueCache,
    completed_labels: &BTreeSet<String>,
) -> Disposition {
    if !binding.applies_to(param_id) {
        return Disposition::Proceed;
    }

    let unresolved: Vec<&Issue> = binding
        .refs()
        .iter()
        .filter_map(|url| cache.get(url))
        .filter(|issue| !issue.is_resolved(completed_labels))
        .collect();

    if unresolved.is_empty() {
        return Disposition::Proceed;
    }

    if binding.skip {
        Disposition::Skip { reason: reason_text("Skipping", &unresolved) }
    } else {
        Disposition::ExpectedFailure {
            reason: reason_text("Expecting failure", &unresolved),
            raises: binding.raises.clone(),
        }
    }
}

/// Builds the multi-line reason enumerating unresolved issues, one per
/// line, in the order their references were declared on the test.
fn reason_text(verb: &str, unresolved: &[&Issue]) -> String {
    let mut text = format!("{verb} due to unresolved github issues:");
    for issue in unresolved {
        let _ = write!(text, "\n{} [{}] {}", issue.url, issue.state.as_str(), issue.title);
    }
    text
}
