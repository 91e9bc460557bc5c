//! Suite execution: applies dispositions and aggregates outcomes.
//!
//! The runner is the adapter layer between the host framework's
//! collect-then-execute model and the session hooks: collection populates
//! the issue cache, then each case is set up and run in order.

use crate::binding::IssueBinding;
use crate::resolve::Disposition;
use crate::session::Session;

/// A failure reported by a test body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    /// Failure kind, matched against a binding's `raises` filter.
    pub kind: String,
    /// Failure message.
    pub message: String,
}

impl TestFailure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(), message: message.into() }
    }
}

/// The body of a test case.
pub type TestBody = Box<dyn Fn() -> Result<(), TestFailure>>;

/// A single collected test case.
pub struct TestCase {
    /// Test name as reported in summaries.
    pub name: String,
    /// Parametrized case identifier, when the test is one instance of a
    /// parametrized family.
    pub param_id: Option<String>,
    /// Issue binding declared on the test, if any.
    pub binding: Option<IssueBinding>,
    /// The test body.
    pub body: TestBody,
}

impl TestCase {
    /// Creates an unbound case.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        body: impl Fn() -> Result<(), TestFailure> + 'static,
    ) -> Self {
        Self { name: name.into(), param_id: None, binding: None, body: Box::new(body) }
    }

    /// Attaches an issue binding.
    #[must_use]
    pub fn with_binding(mut self, binding: IssueBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Sets the parametrized case identifier.
    #[must_use]
    pub fn with_param_id(mut self, id: impl Into<String>) -> Self {
        self.param_id = Some(id.into());
        self
    }

    /// Name including the parametrized case identifier, when present.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.param_id {
            Some(id) => format!("{}[{id}]", self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("param_id", &self.param_id)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// Final outcome of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The body ran and passed.
    Passed,
    /// The body ran and failed for real.
    Failed {
        /// The reported failure message.
        message: String,
    },
    /// The body was not run.
    Skipped {
        /// Why the case was skipped.
        reason: String,
    },
    /// The body failed as anticipated.
    Xfailed {
        /// Why the failure was anticipated.
        reason: String,
    },
    /// The body passed although a failure was anticipated.
    Xpassed,
    /// Setup failed before the body could run.
    Error {
        /// The setup error.
        message: String,
    },
}

/// Per-case result.
#[derive(Debug)]
pub struct CaseReport {
    /// Test name.
    pub name: String,
    /// Parametrized case identifier, if any.
    pub param_id: Option<String>,
    /// Final outcome.
    pub outcome: Outcome,
}

/// Aggregated results of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Per-case reports in suite order.
    pub reports: Vec<CaseReport>,
    /// Non-fatal warnings raised during the run.
    pub warnings: Vec<String>,
}

impl RunSummary {
    fn count(&self, matches: impl Fn(&Outcome) -> bool) -> usize {
        self.reports.iter().filter(|report| matches(&report.outcome)).count()
    }

    /// Number of tests that ran and passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Passed))
    }

    /// Number of genuine failures.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed { .. }))
    }

    /// Number of skipped tests.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped { .. }))
    }

    /// Number of anticipated failures.
    #[must_use]
    pub fn xfailed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Xfailed { .. }))
    }

    /// Number of tests that passed despite an anticipated failure.
    #[must_use]
    pub fn xpassed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Xpassed))
    }

    /// Number of setup errors.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Error { .. }))
    }

    /// Returns `true` when no test failed or errored.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errors() == 0
    }
}

/// Runs a suite to completion under the given session.
///
/// Collection (cache population) happens first, before any body runs; each
/// case is then set up and executed in order. The session's warnings move
/// into the returned summary.
#[must_use]
pub fn run_suite(mut session: Session, cases: &[TestCase]) -> RunSummary {
    let setup_errors = session.collect(cases);
    let mut reports = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        let outcome = match setup_errors.get(&index) {
            Some(err) => Outcome::Error { message: err.to_string() },
            None => execute(case, session.setup(case)),
        };
        tracing::debug!(case = %case.display_name(), ?outcome, "case finished");
        reports.push(CaseReport {
            name: case.name.clone(),
            param_id: case.param_id.clone(),
            outcome,
        });
    }
    RunSummary { reports, warnings: session.into_warnings() }
}

/// Executes one case under its disposition.
fn execute(case: &TestCase, disposition: Disposition) -> Outcome {
    match disposition {
        Disposition::Skip { reason } => Outcome::Skipped { reason },
        Disposition::Proceed => match (case.body)() {
            Ok(()) => Outcome::Passed,
            Err(failure) => Outcome::Failed { message: failure.message },
        },
        Disposition::ExpectedFailure { reason, raises } => match (case.body)() {
            Ok(()) => Outcome::Xpassed,
            Err(failure) => {
                let absorbed = raises.as_deref().map_or(true, |kind| kind == failure.kind);
                if absorbed {
                    Outcome::Xfailed { reason }
                } else {
                    Outcome::Failed { message: failure.message }
                }
            }
        },
    }
}
