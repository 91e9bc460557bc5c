//! End-to-end suite outcomes with a scripted tracker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use issuegate::binding::IssueBinding;
use issuegate::config::GithubConfig;
use issuegate::runner::{run_suite, Outcome, RunSummary, TestCase, TestFailure};
use issuegate::session::Session;
use issuegate::tracker::{IssueTracker, RemoteIssue, RemoteLabel, TrackerError};
use issuegate::warnings::WarningSink;

const OPEN_ISSUE: &str = "https://github.com/acme/open/issues/1";
const CLOSED_ISSUE: &str = "https://github.com/acme/closed/issues/2";
const LABELED_ISSUE: &str = "https://github.com/acme/labeled/issues/3";
const PRIVATE_ISSUE: &str = "https://github.com/acme/secret/issues/9";

/// Scripted tracker in the spirit of a canned API: the repo name decides
/// the issue's fate. `closed` issues are closed, `labeled` issues are open
/// but carry the ready-for-test label, `secret` rejects the credentials.
struct FakeTracker {
    calls: Arc<AtomicUsize>,
}

impl IssueTracker for FakeTracker {
    fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<RemoteIssue, TrackerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let labels = match repo {
            "secret" => return Err(TrackerError::Auth("bad credentials".to_string())),
            "labeled" => vec![RemoteLabel { name: "state:Ready For Test".to_string() }],
            _ => Vec::new(),
        };
        let state = if repo == "closed" { "closed" } else { "open" };
        Ok(RemoteIssue {
            number,
            title: "Mock issue title".to_string(),
            html_url: format!("https://github.com/{owner}/{repo}/issues/{number}"),
            state: state.to_string(),
            labels,
            closed_at: None,
        })
    }
}

fn session(completed: &[&str], calls: &Arc<AtomicUsize>) -> Session {
    let config = GithubConfig {
        username: None,
        token: None,
        completed_labels: completed.iter().map(ToString::to_string).collect(),
    };
    Session::new(config, Box::new(FakeTracker { calls: Arc::clone(calls) }), WarningSink::new())
}

fn run(completed: &[&str], cases: Vec<TestCase>) -> RunSummary {
    let calls = Arc::new(AtomicUsize::new(0));
    run_suite(session(completed, &calls), &cases)
}

fn passing(name: &str) -> TestCase {
    TestCase::new(name, || Ok(()))
}

fn failing(name: &str) -> TestCase {
    TestCase::new(name, || Err(TestFailure::new("assertion", "assert failed")))
}

fn counts(summary: &RunSummary) -> (usize, usize, usize, usize, usize, usize) {
    (
        summary.passed(),
        summary.failed(),
        summary.skipped(),
        summary.xfailed(),
        summary.xpassed(),
        summary.errors(),
    )
}

#[test]
fn success_without_issue() {
    let summary = run(&[], vec![passing("test_func")]);
    assert_eq!(counts(&summary), (1, 0, 0, 0, 0, 0));
    assert!(summary.is_success());
}

#[test]
fn failure_without_issue() {
    let summary = run(&[], vec![failing("test_func")]);
    assert_eq!(counts(&summary), (0, 1, 0, 0, 0, 0));
    assert!(!summary.is_success());
}

#[test]
fn failure_with_open_issue_is_xfailed() {
    let summary = run(&[], vec![failing("test_func").with_binding(IssueBinding::new([OPEN_ISSUE]))]);
    assert_eq!(counts(&summary), (0, 0, 0, 1, 0, 0));
    assert!(summary.is_success());
}

#[test]
fn success_with_open_issue_is_xpassed() {
    let summary = run(&[], vec![passing("test_func").with_binding(IssueBinding::new([OPEN_ISSUE]))]);
    assert_eq!(counts(&summary), (0, 0, 0, 0, 1, 0));
    assert!(summary.is_success());
}

#[test]
fn open_issue_with_skip_is_skipped_either_way() {
    let binding = IssueBinding::new([OPEN_ISSUE]).with_skip();
    let summary = run(
        &[],
        vec![
            passing("test_pass").with_binding(binding.clone()),
            failing("test_fail").with_binding(binding),
        ],
    );
    assert_eq!(counts(&summary), (0, 0, 2, 0, 0, 0));
}

#[test]
fn closed_issue_leaves_the_outcome_alone() {
    let binding = IssueBinding::new([CLOSED_ISSUE]);
    let summary = run(
        &[],
        vec![
            passing("test_pass").with_binding(binding.clone()),
            failing("test_fail").with_binding(binding),
        ],
    );
    assert_eq!(counts(&summary), (1, 1, 0, 0, 0, 0));
}

#[test]
fn completed_label_treats_an_open_issue_as_done() {
    let binding = IssueBinding::new([LABELED_ISSUE]);
    let summary = run(
        &["state:Ready For Test"],
        vec![
            passing("test_pass").with_binding(binding.clone()),
            failing("test_fail").with_binding(binding),
        ],
    );
    assert_eq!(counts(&summary), (1, 1, 0, 0, 0, 0));
}

#[test]
fn mixed_issues_are_driven_by_the_open_one() {
    let binding = IssueBinding::new([CLOSED_ISSUE, OPEN_ISSUE]);
    let summary = run(&[], vec![failing("test_func").with_binding(binding)]);
    assert_eq!(counts(&summary), (0, 0, 0, 1, 0, 0));
    match &summary.reports[0].outcome {
        Outcome::Xfailed { reason } => {
            assert!(reason.contains(OPEN_ISSUE));
            assert!(!reason.contains(CLOSED_ISSUE));
        }
        other => panic!("expected Xfailed, got {other:?}"),
    }
}

#[test]
fn each_distinct_reference_is_fetched_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cases = vec![
        failing("test_a").with_binding(IssueBinding::new([OPEN_ISSUE])),
        failing("test_b").with_binding(IssueBinding::new([OPEN_ISSUE, CLOSED_ISSUE])),
        passing("test_c").with_binding(IssueBinding::new([CLOSED_ISSUE])),
    ];
    let summary = run_suite(session(&[], &calls), &cases);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(summary.is_success());
}

#[test]
fn unreachable_issue_warns_and_is_excluded_from_resolution() {
    let summary =
        run(&[], vec![failing("test_func").with_binding(IssueBinding::new([PRIVATE_ISSUE]))]);
    // The failure stays genuine: the gate cannot vouch for an issue it
    // could not see.
    assert_eq!(counts(&summary), (0, 1, 0, 0, 0, 0));
    assert!(summary
        .warnings
        .iter()
        .any(|warning| warning.contains(&format!("Unable to inspect github issue {PRIVATE_ISSUE}"))));
}

#[test]
fn malformed_reference_errors_that_case_only() {
    let summary = run(
        &[],
        vec![
            passing("test_bad").with_binding(IssueBinding::new(["https://github.com"])),
            passing("test_good").with_binding(IssueBinding::new([CLOSED_ISSUE])),
            passing("test_plain"),
        ],
    );
    assert_eq!(counts(&summary), (2, 0, 0, 0, 0, 1));
    match &summary.reports[0].outcome {
        Outcome::Error { message } => assert!(message.contains("Malformed github issue URL")),
        other => panic!("expected Error, got {other:?}"),
    }
}

#[test]
fn empty_reference_is_malformed() {
    let summary = run(&[], vec![passing("test_func").with_binding(IssueBinding::new([""]))]);
    assert_eq!(summary.errors(), 1);
}

#[test]
fn ids_gate_individual_parametrized_instances() {
    let binding = IssueBinding::new([OPEN_ISSUE]).with_ids(["even2", "even4"]);
    let cases: Vec<TestCase> = [("odd1", 1_u32), ("even2", 2), ("odd3", 3), ("even4", 4)]
        .into_iter()
        .map(|(id, count)| {
            TestCase::new("test_will_xfail", move || {
                if count % 2 == 1 {
                    Ok(())
                } else {
                    Err(TestFailure::new("assertion", "count is even"))
                }
            })
            .with_param_id(id)
            .with_binding(binding.clone())
        })
        .collect();

    let summary = run(&[], cases);
    assert_eq!(counts(&summary), (2, 0, 0, 2, 0, 0));
    assert!(summary.is_success());
}

#[test]
fn raises_narrows_which_failures_are_absorbed() {
    let binding = IssueBinding::new([OPEN_ISSUE]).with_raises("overflow");
    let overflow = || Err(TestFailure::new("overflow", "attempt to add with overflow"));

    let summary = run(
        &[],
        vec![
            TestCase::new("test_matching_kind", overflow).with_binding(binding.clone()),
            failing("test_other_kind").with_binding(binding.clone()),
            TestCase::new("test_skip_wins", overflow).with_binding(binding.with_skip()),
        ],
    );
    assert_eq!(counts(&summary), (0, 1, 1, 1, 0, 0));
}

#[test]
fn raises_with_a_closed_issue_never_absorbs() {
    let binding = IssueBinding::new([CLOSED_ISSUE]).with_raises("overflow");
    let summary = run(
        &[],
        vec![TestCase::new("test_func", || Err(TestFailure::new("overflow", "boom")))
            .with_binding(binding)],
    );
    assert_eq!(counts(&summary), (0, 1, 0, 0, 0, 0));
}
