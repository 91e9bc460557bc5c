//! Test-to-issue bindings.

/// Associates one test with the issues it is known to fail on.
///
/// Built from test metadata at collection time and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct IssueBinding {
    refs: Vec<String>,
    /// Skip the test instead of expecting failure when issues are
    /// unresolved. Off by default.
    pub skip: bool,
    /// Only absorb failures of this kind; any other failure stays genuine.
    pub raises: Option<String>,
    /// Restrict the binding to these parametrized case identifiers. Empty
    /// means the binding applies to every instance.
    pub ids: Vec<String>,
}

impl IssueBinding {
    /// Creates a binding over the given references.
    ///
    /// Duplicate references are dropped, keeping first-seen order.
    #[must_use]
    pub fn new<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for reference in refs {
            let reference = reference.into();
            if !deduped.contains(&reference) {
                deduped.push(reference);
            }
        }
        Self { refs: deduped, skip: false, raises: None, ids: Vec::new() }
    }

    /// Marks unresolved issues as skip rather than expected failure.
    #[must_use]
    pub fn with_skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Narrows the expected failure to a single failure kind.
    #[must_use]
    pub fn with_raises(mut self, kind: impl Into<String>) -> Self {
        self.raises = Some(kind.into());
        self
    }

    /// Restricts the binding to specific parametrized case identifiers.
    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// The bound references, deduplicated in declaration order.
    #[must_use]
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    /// Returns `true` when the binding applies to the given parametrized
    /// case identifier.
    #[must_use]
    pub fn applies_to(&self, param_id: Option<&str>) -> bool {
        if self.ids.is_empty() {
            return true;
        }
        param_id.is_some_and(|id| self.ids.iter().any(|candidate| candidate == id))
    }
}
