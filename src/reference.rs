//! Issue reference parsing and validation.
//!
//! A reference is the literal URL string a test declares; parsing
//! decomposes it into the `(owner, repo, number)` triple the tracker API
//! needs. Validation is pure string work and never touches the network.

use std::sync::OnceLock;

use regex::Regex;

/// Error raised for an issue reference that does not match the canonical
/// URL form. Carries the offending string for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed github issue URL: '{0}'")]
pub struct MalformedRefError(pub String);

/// The decomposition of an issue reference URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRef {
    /// Account or organization owning the repository.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue or pull request number.
    pub number: u64,
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^/]+/([^/]+)/([^/]+)/(?:issues|pull)/([0-9]+)$")
            .expect("issue reference pattern is valid")
    })
}

/// Validates a candidate issue reference and decomposes it.
///
/// The reference must have the form
/// `scheme://host/{owner}/{repo}/(issues|pull)/{number}` where `owner` and
/// `repo` are non-empty path segments and `number` is a positive integer.
///
/// # Errors
///
/// Returns [`MalformedRefError`] carrying the original string when the
/// candidate does not match.
pub fn parse(url: &str) -> Result<ParsedRef, MalformedRefError> {
    let captures = pattern().captures(url).ok_or_else(|| MalformedRefError(url.to_string()))?;
    let number: u64 = captures[3].parse().map_err(|_| MalformedRefError(url.to_string()))?;
    if number == 0 {
        return Err(MalformedRefError(url.to_string()));
    }
    Ok(ParsedRef { owner: captures[1].to_string(), repo: captures[2].to_string(), number })
}
