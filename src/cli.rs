//! Command line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{LogConfig, SelectConfig};

const ABOUT: &str = "semver-select selects matching semvers from a list.";

const LONG_ABOUT: &str = "\
semver-select selects matching semvers from a list.

For example, get the newest version of go 1.15 like so:

  curl -Ls 'https://golang.org/dl/?mode=json&include=all' \\
    | jq -r '.[].version' \\
    | sed 's/^go//g' \\
    | semver-select -i -c '1.15' -";

#[derive(Parser, Debug)]
#[command(name = "semver-select")]
#[command(version, about = ABOUT, long_about = LONG_ABOUT)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Output semver-select version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Semver constraint to match
    #[arg(short, long)]
    pub constraint: String,

    /// Maximum number of results to output
    #[arg(short = 'n', long, default_value_t = 0)]
    pub max_results: usize,

    /// Ignore invalid candidates instead of erroring
    #[arg(short, long)]
    pub ignore_invalid: bool,

    /// Just validate the constraint. Exits non-zero if invalid
    #[arg(long)]
    pub validate_constraint: bool,

    /// Allow go-style versions for candidates (e.g. 1.15rc1 or go1.20)
    #[arg(long = "go")]
    pub go_versions: bool,

    /// Output original version strings instead of normalized versions
    #[arg(long)]
    pub orig: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Candidate versions to consider -- value of "-" indicates stdin
    pub candidates: Vec<String>,
}

impl Cli {
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig {
            constraint: self.constraint.clone(),
            max_results: self.max_results,
            ignore_invalid: self.ignore_invalid,
            validate_only: self.validate_constraint,
            lenient: self.go_versions,
            use_original: self.orig,
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_env(self.log_file.clone())
    }
}
