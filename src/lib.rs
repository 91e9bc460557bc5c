//! Core library for the `issuegate` harness plugin.
//!
//! `issuegate` links test cases to github issues so that a test known to
//! fail because of a tracked, unresolved defect is reported as an expected
//! failure (or skipped) instead of a hard failure. The host test binary
//! builds its [`runner::TestCase`] list and calls [`run`] with its own
//! command-line arguments.

pub mod binding;
pub mod cache;
pub mod cli;
pub mod config;
pub mod github;
pub mod issue;
pub mod reference;
pub mod resolve;
pub mod runner;
pub mod session;
pub mod summary;
pub mod tracker;
pub mod warnings;

use clap::Parser;

use crate::runner::{RunSummary, TestCase};
use crate::session::Session;
use crate::tracker::IssueTracker;
use crate::warnings::WarningSink;

/// Runs a suite of test cases under the provided arguments.
///
/// Parses the `--github-*` option surface from `args`, resolves the
/// effective configuration, and either executes the suite against the live
/// GitHub API or, when `--github-summary` is set, prints the issue report
/// without running any test body.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the tracker
/// client cannot be constructed.
pub fn run<I, T>(args: I, cases: &[TestCase]) -> Result<RunSummary, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let opts = cli::Options::try_parse_from(args).map_err(|err| err.to_string())?;
    dotenvy::dotenv().ok();
    let mut warnings = WarningSink::new();
    let config = config::resolve(&opts, &mut warnings);
    let tracker = github::GitHubTracker::new(config.username.as_deref(), config.token.as_deref())
        .map_err(|err| format!("Failed to initialize github client: {err}"))?;
    Ok(run_with_tracker(&opts, config, warnings, Box::new(tracker), cases))
}

/// Runs a suite with an explicit tracker implementation.
///
/// The injection seam for tests and for hosts targeting a non-GitHub
/// tracker; [`run`] wires the live adapter through here.
#[must_use]
pub fn run_with_tracker(
    opts: &cli::Options,
    config: config::GithubConfig,
    warnings: WarningSink,
    tracker: Box<dyn IssueTracker>,
    cases: &[TestCase],
) -> RunSummary {
    let mut session = Session::new(config, tracker, warnings);
    if opts.summary {
        session.collect(cases);
        println!("{}", summary::render(cases, session.cache()));
        return RunSummary { reports: Vec::new(), warnings: session.into_warnings() };
    }
    runner::run_suite(session, cases)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_executes_an_empty_suite() {
        let summary = run(["issuegate", "--github-cfg", "no-such-file.yml"], &[]).unwrap();
        assert!(summary.is_success());
        assert!(summary.reports.is_empty());
        // The missing configuration file is a warning, never an error.
        assert!(summary
            .warnings
            .iter()
            .any(|warning| warning.contains("No github configuration file found")));
    }

    #[test]
    fn run_errors_on_unknown_options() {
        let result = run(["issuegate", "--unknown-flag"], &[]);
        assert!(result.is_err());
    }
}
