// src/config.rs
// =============================================================================
// Turns parsed CLI arguments into one validated Config value.
//
// Config is built once in main.rs and passed by reference to the driver.
// Nothing else reads flags or environment variables for settings.
// =============================================================================

use std::path::{Path, PathBuf};

use url::Url;

use crate::cli::Cli;
use crate::error::AppError;

/// What this run is supposed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the executable name and version, no network access.
    Version,
    /// Print every language in the index.
    List,
    /// Download the template for `language` and write it to disk.
    Fetch { language: String },
}

/// Validated settings for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub filename: String,
    pub directory: PathBuf,
    /// `None` means anonymous requests; empty tokens are dropped here.
    pub token: Option<String>,
    pub api_url: Url,
    pub verbose: u8,
}

impl TryFrom<Cli> for Config {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let action = if cli.version {
            Action::Version
        } else if cli.list {
            Action::List
        } else {
            match cli.language.as_deref() {
                Some(language) if !language.is_empty() => Action::Fetch {
                    language: language.to_lowercase(),
                },
                _ => return Err(AppError::Usage("please specify a language".to_string())),
            }
        };

        let api_url = Url::parse(&cli.api_url)
            .map_err(|e| AppError::Usage(format!("invalid API URL {:?}: {}", cli.api_url, e)))?;

        if api_url.cannot_be_a_base() {
            return Err(AppError::Usage(format!(
                "invalid API URL {:?}: not a base URL",
                cli.api_url
            )));
        }

        if cli.filename.is_empty() {
            return Err(AppError::Usage("--filename must not be empty".to_string()));
        }

        // Path::join would throw the directory away for an absolute name
        if Path::new(&cli.filename).has_root() {
            return Err(AppError::Usage(format!(
                "--filename {:?} must be relative to --directory",
                cli.filename
            )));
        }

        Ok(Config {
            action,
            filename: cli.filename,
            directory: cli.directory,
            token: cli.token.filter(|t| !t.is_empty()),
            api_url,
            verbose: cli.verbose,
        })
    }
}
