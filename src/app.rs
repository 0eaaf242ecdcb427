// src/app.rs
// =============================================================================
// The driver: runs one invocation from a validated Config.
//
// Flow (each step aborts the rest on error):
// 1. Build the language index from the repository tree
// 2. --list: page the language names and stop
// 3. Look up the requested language
// 4. Download and decode its blob
// 5. Write it to <directory>/<filename>
//
// The source and pager come in as parameters, so tests run the whole flow
// against in-memory fakes.
// =============================================================================

use std::path::PathBuf;

use tracing::info;

use crate::config::{Action, Config};
use crate::error::{AppError, RemoteError};
use crate::github::{build_index, fetch_content, GitHubClient, LanguageIndex, TemplateSource};
use crate::output::{show, write_template, Pager};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The version line, for main.rs to print.
    Version(String),
    /// The language list was shown.
    Listed { languages: usize },
    /// The template was written to this absolute path.
    Written(PathBuf),
}

/// Executes `config.action` against GitHub.
///
/// --version returns before any client is built, so a bad token or API
/// host can't make it fail.
pub async fn execute(config: &Config, pager: &dyn Pager) -> Result<Outcome, AppError> {
    if config.action == Action::Version {
        return Ok(Outcome::Version(version_line()));
    }

    let client = connect(config)?;
    run(config, &client, pager).await
}

/// Builds the GitHub client from the configured host and token.
pub fn connect(config: &Config) -> Result<GitHubClient, AppError> {
    GitHubClient::new(config.api_url.clone(), config.token.as_deref()).map_err(|e| match e {
        // Nothing was sent yet: the token itself is unusable
        RemoteError::InvalidToken => AppError::Usage(format!("invalid --token/GH_TOKEN: {}", e)),
        other => AppError::RemoteIndex(other),
    })
}

/// Executes `config.action` against `source`.
pub async fn run<S>(config: &Config, source: &S, pager: &dyn Pager) -> Result<Outcome, AppError>
where
    S: TemplateSource + ?Sized,
{
    let language = match &config.action {
        Action::Version => return Ok(Outcome::Version(version_line())),
        Action::List => {
            let index = build_index(source).await?;
            show(pager, &render_language_list(&index));
            return Ok(Outcome::Listed {
                languages: index.len(),
            });
        }
        Action::Fetch { language } => language,
    };

    let index = build_index(source).await?;

    let sha = index
        .lookup(language)
        .ok_or_else(|| AppError::LanguageNotFound(language.clone()))?;
    info!(%language, %sha, "resolved template");

    let content = fetch_content(source, sha).await?;

    let path = write_template(&config.directory, &config.filename, &content)?;
    Ok(Outcome::Written(path))
}

/// "Available languages:\n" followed by "\n<name>" per language.
pub fn render_language_list(index: &LanguageIndex) -> String {
    let mut output = String::from("Available languages:\n");
    for language in index.languages() {
        output.push('\n');
        output.push_str(language);
    }
    output
}

/// "<executable> version <version>"
///
/// The version can be stamped at build time through
/// GITIGNORE_FETCH_BUILD_VERSION; otherwise the crate version is used.
pub fn version_line() -> String {
    let executable = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let version = option_env!("GITIGNORE_FETCH_BUILD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    format!("{} version {}", executable, version)
}
