//! Command-line option surface for the `--github-*` family.

use std::path::PathBuf;

use clap::Parser;

/// Options controlling github issue integration.
///
/// The host test binary forwards its arguments here. Defaults give the
/// zero-configuration behavior: `github.yml` beside the suite, anonymous
/// tracker access, no completed labels.
#[derive(Debug, Parser)]
#[command(name = "issuegate", about = "Gate test outcomes on linked github issues")]
pub struct Options {
    /// GitHub configuration file.
    #[arg(long = "github-cfg", value_name = "GITHUB_CFG", default_value = "github.yml")]
    pub cfg_file: PathBuf,

    /// GitHub username (defaults to the value supplied in the configuration file).
    #[arg(long = "github-username", value_name = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// GitHub personal access token (defaults to the value supplied in the
    /// configuration file).
    #[arg(long = "github-token", value_name = "GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Treat issues carrying this label as done; repeatable, accumulates.
    #[arg(long = "github-completed", value_name = "GITHUB_COMPLETED")]
    pub completed: Vec<String>,

    /// Show a summary of all linked issues and their tests instead of
    /// running the suite.
    #[arg(long = "github-summary")]
    pub summary: bool,
}
