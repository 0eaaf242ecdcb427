// src/error.rs
// =============================================================================
// Every way a run can fail, as one typed enum.
//
// Components return `Result<T, AppError>` and never exit the process
// themselves. main.rs is the only place that prints an error and turns it
// into an exit status.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[source]: keeps the underlying error reachable for `{:#}`-style chains
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by the driver and its components.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid command-line input. No network call has been made.
    #[error("{0}")]
    Usage(String),

    /// Listing the template repository's tree failed.
    #[error("fail to get available languages: {0}")]
    RemoteIndex(#[source] RemoteError),

    /// The requested language is not in the index.
    #[error("language {0:?} not found")]
    LanguageNotFound(String),

    /// Downloading the template blob failed.
    #[error("fail to download file content: {0}")]
    RemoteFetch(#[source] RemoteError),

    /// The blob declared an encoding we cannot decode.
    #[error("fail to download file content: encoding {0:?} is not supported")]
    UnsupportedEncoding(String),

    /// Creating or writing the output file failed.
    #[error("fail to write content to {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// Every failure maps to 1; success and informational modes exit with 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_)
            | AppError::RemoteIndex(_)
            | AppError::LanguageNotFound(_)
            | AppError::RemoteFetch(_)
            | AppError::UnsupportedEncoding(_)
            | AppError::FileWrite { .. } => 1,
        }
    }
}

/// Failure while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport or JSON decoding failure reported by reqwest.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API returned HTTP {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The token can't be sent as an HTTP header value.
    #[error("token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// The blob payload was not valid base64.
    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
}
