//! Live adapter for the `IssueTracker` port using the GitHub REST API.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::tracker::{IssueTracker, RemoteIssue, TrackerError};

const DEFAULT_API_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("issuegate/", env!("CARGO_PKG_VERSION"));

/// Live tracker client for the GitHub REST API.
///
/// Each lookup blocks on a private current-thread runtime, keeping the
/// port synchronous for the host framework's sequential execution model.
pub struct GitHubTracker {
    client: Client,
    runtime: tokio::runtime::Runtime,
    username: Option<String>,
    token: Option<String>,
    base_url: String,
}

impl GitHubTracker {
    /// Creates a client against the public GitHub API.
    ///
    /// With a username and token the client uses basic authentication;
    /// with only a token it sends a bearer token; with neither it talks to
    /// the API anonymously.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Auth`] when the client runtime cannot be
    /// constructed.
    pub fn new(username: Option<&str>, token: Option<&str>) -> Result<Self, TrackerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| TrackerError::Auth(format!("failed to start client runtime: {err}")))?;
        Ok(Self {
            client: Client::new(),
            runtime,
            username: username.map(String::from),
            token: token.map(String::from),
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Overrides the API base URL (points the client at a test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Error body returned by the GitHub API.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Builds the issue endpoint URL.
fn issue_url(base_url: &str, owner: &str, repo: &str, number: u64) -> String {
    format!("{}/repos/{owner}/{repo}/issues/{number}", base_url.trim_end_matches('/'))
}

/// Maps a non-success response to a tracker error.
fn map_failure(status: StatusCode, body: &str) -> TrackerError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| body.to_string());
    match status {
        StatusCode::NOT_FOUND => TrackerError::NotFound,
        StatusCode::UNAUTHORIZED => TrackerError::Auth(message),
        StatusCode::FORBIDDEN => {
            if message.to_lowercase().contains("rate limit") {
                TrackerError::RateLimit
            } else {
                TrackerError::Auth(message)
            }
        }
        _ => TrackerError::Api(format!("{} - {message}", status.as_u16())),
    }
}

impl IssueTracker for GitHubTracker {
    fn fetch_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<RemoteIssue, TrackerError> {
        let url = issue_url(&self.base_url, owner, repo, number);
        tracing::debug!(%url, "fetching github issue");
        self.runtime.block_on(async {
            let mut request = self
                .client
                .get(&url)
                .header("Accept", ACCEPT_HEADER)
                .header("User-Agent", USER_AGENT);
            request = match (&self.username, &self.token) {
                (Some(username), Some(token)) => request.basic_auth(username, Some(token)),
                (None, Some(token)) => request.bearer_auth(token),
                _ => request,
            };
            let response = request
                .send()
                .await
                .map_err(|err| TrackerError::Api(format!("request failed: {err}")))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| TrackerError::Api(format!("failed to read response: {err}")))?;

            if !status.is_success() {
                return Err(map_failure(status, &body));
            }

            serde_json::from_str::<RemoteIssue>(&body)
                .map_err(|err| TrackerError::Api(format!("failed to parse response: {err}")))
        })
    }
}
