//! Configuration resolution for tracker credentials and completed labels.
//!
//! Precedence, highest to lowest: command-line option, environment
//! variable (`GITHUB_USERNAME` / `GITHUB_TOKEN`), configuration-file
//! value, built-in default. Configuration problems degrade to defaults
//! with a warning; they never abort the run.

use std::collections::BTreeSet;
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::cli::Options;
use crate::warnings::WarningSink;

/// Effective configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct GithubConfig {
    /// Tracker username for basic authentication.
    pub username: Option<String>,
    /// Personal access token.
    pub token: Option<String>,
    /// Labels that mark an open issue as practically done.
    pub completed_labels: BTreeSet<String>,
}

/// Top-level document shape of the configuration file.
#[derive(Debug, Deserialize)]
struct ConfigDoc {
    github: Option<FileConfig>,
}

/// The `github` mapping within the configuration file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    username: Option<String>,
    token: Option<String>,
    #[serde(default)]
    completed: Vec<String>,
}

/// Resolves the effective configuration from options, environment, and the
/// configuration file.
///
/// The completed-label set takes the command-line accumulation when
/// non-empty, otherwise the file's sequence.
#[must_use]
pub fn resolve(opts: &Options, warnings: &mut WarningSink) -> GithubConfig {
    let file = load_file(&opts.cfg_file, warnings);

    let username =
        opts.username.clone().or_else(|| env_value("GITHUB_USERNAME")).or(file.username);
    let token = opts.token.clone().or_else(|| env_value("GITHUB_TOKEN")).or(file.token);
    let completed_labels = if opts.completed.is_empty() {
        file.completed.into_iter().collect()
    } else {
        opts.completed.iter().cloned().collect()
    };

    GithubConfig { username, token, completed_labels }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Loads the `github` mapping from the configuration file.
///
/// Returns defaults, with a warning, when the file is missing, unreadable,
/// does not parse, or lacks the `github` key.
fn load_file(path: &Path, warnings: &mut WarningSink) -> FileConfig {
    if !path.is_file() {
        warnings
            .warn(format!("No github configuration file found matching: {}", path.display()));
        return FileConfig::default();
    }
    tracing::debug!(path = %path.display(), "loading github configuration");
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warnings.warn(format!(
                "Unable to read github configuration file {} ({err})",
                path.display()
            ));
            return FileConfig::default();
        }
    };
    match serde_yaml::from_str::<ConfigDoc>(&contents) {
        Ok(ConfigDoc { github: Some(config) }) => config,
        Ok(ConfigDoc { github: None }) => {
            warnings.warn(format!("No github configuration found in file: {}", path.display()));
            FileConfig::default()
        }
        Err(err) => {
            warnings.warn(format!(
                "No github configuration found in file: {} ({err})",
                path.display()
            ));
            FileConfig::default()
        }
    }
}
