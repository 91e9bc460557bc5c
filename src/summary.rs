//! Issue summary report.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::cache::IssueCache;
use crate::runner::TestCase;

/// Renders the github issue report: every referenced issue, sorted by URL,
/// with the tests that reference it.
///
/// Issues whose lookup succeeded are annotated with their state and title;
/// references the cache could not see are listed bare.
#[must_use]
pub fn render(cases: &[TestCase], cache: &IssueCache) -> String {
    let mut issue_map: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for case in cases {
        let Some(binding) = &case.binding else { continue };
        for url in binding.refs() {
            issue_map.entry(url.as_str()).or_default().push(case.display_name());
        }
    }

    let mut report = String::from("github issue report\n");
    if issue_map.is_empty() {
        report.push_str("No github issues collected\n");
        return report;
    }
    for (url, tests) in &issue_map {
        match cache.get(url) {
            Some(issue) => {
                let _ = writeln!(report, "{url} [{}] {}", issue.state.as_str(), issue.title);
            }
            None => {
                let _ = writeln!(report, "{url}");
            }
        }
        for test in tests {
            let _ = writeln!(report, " - {test}");
        }
    }
    report
}
