// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   gitignore-fetch rust                       -> ./.gitignore from Rust.gitignore
//   gitignore-fetch python --directory ../app  -> ../app/.gitignore
//   gitignore-fetch --list                     -> every available language
//
// clap only parses here. Checking that the combination of arguments makes
// sense happens in config.rs, so it can be tested without a process.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::github::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "gitignore-fetch",
    about = "Download a .gitignore template from github/gitignore",
    long_about = "gitignore-fetch looks up a language in the github/gitignore repository \
                  and writes its template to a local file.",
    // --version is handled by main.rs, it prints the executable path too
    disable_version_flag = true
)]
pub struct Cli {
    /// Language whose template to download (case-insensitive, e.g. "rust")
    ///
    /// Required unless --list or --version is given.
    pub language: Option<String>,

    /// Output file name
    #[arg(long, default_value = ".gitignore")]
    pub filename: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub directory: PathBuf,

    /// GitHub token, useful when anonymous requests are rate-limited
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// List available languages on github/gitignore@main
    #[arg(long)]
    pub list: bool,

    /// Show version
    #[arg(long)]
    pub version: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Option<String> for the language?
//    - --list and --version don't need one
//    - clap can't express "required unless X or Y, and not empty" together
//      with our exit-code rules, so config.rs does that check
//
// 2. env = "GH_TOKEN"
//    - Needs clap's "env" feature
//    - The flag wins over the environment variable when both are set
//    - hide_env_values keeps the token out of --help output
//
// 3. ArgAction::Count
//    - Each -v adds one, so -vv gives verbose == 2
// -----------------------------------------------------------------------------
