// src/github/client.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Endpoints used (both live under /repos/{owner}/{repo}/git/):
// - trees/{branch}  -> non-recursive listing of the repository root
// - blobs/{sha}     -> a single file's content, usually base64 encoded
//
// Authentication:
// - Anonymous requests work but are rate limited (60/hour per IP)
// - A token (from --token or GH_TOKEN) is sent as a Bearer credential
//
// Rust concepts:
// - Traits: TemplateSource lets tests swap in an in-memory source
// - serde: #[derive(Deserialize)] turns JSON into typed structs
// - async/await: every request is awaited before the next one starts
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::RemoteError;

/// Default GitHub API endpoint. GitHub Enterprise hosts can override it.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Owner of the template repository.
pub const REPO_OWNER: &str = "github";
/// Name of the template repository.
pub const REPO_NAME: &str = "gitignore";
/// Branch whose root tree holds the templates.
pub const REPO_BRANCH: &str = "main";

// One entry of a git tree listing.
//
// GitHub sends more fields (mode, size, url); serde ignores the ones we
// don't declare.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the tree root, e.g. "Rust.gitignore"
    pub path: String,
    /// "blob" for files, "tree" for directories, "commit" for submodules
    #[serde(rename = "type")]
    pub kind: String,
    /// Content identifier used to fetch the blob
    pub sha: String,
}

// Response of GET /repos/{owner}/{repo}/git/trees/{branch}
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub sha: String,
    #[serde(rename = "tree")]
    pub entries: Vec<TreeEntry>,
    /// Set by GitHub when the listing exceeded its size limit
    #[serde(default)]
    pub truncated: bool,
}

// Response of GET /repos/{owner}/{repo}/git/blobs/{sha}
#[derive(Debug, Clone, Deserialize)]
pub struct Blob {
    pub sha: String,
    /// "base64" in practice; anything else is rejected by the fetcher
    pub encoding: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub size: Option<u64>,
}

// Body GitHub sends alongside 4xx/5xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Where the language index and template blobs come from.
///
/// `GitHubClient` is the real implementation; tests provide in-memory ones.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Non-recursive listing of the template repository's root tree.
    async fn get_tree(&self, branch: &str) -> Result<Tree, RemoteError>;

    /// A single blob by its SHA.
    async fn get_blob(&self, sha: &str) -> Result<Blob, RemoteError>;
}

/// HTTP client for the template repository on GitHub.
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Builds a client for `github/gitignore` on the given API host.
    ///
    /// An empty or missing token means anonymous requests.
    pub fn new(api_url: Url, token: Option<&str>) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| RemoteError::InvalidToken)?;
            // Keeps the token out of Debug output
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            debug!("using authenticated GitHub requests");
        }

        // No timeout override: reqwest's defaults apply
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_url,
            owner: REPO_OWNER.to_string(),
            repo: REPO_NAME.to_string(),
        })
    }

    // Builds "{api_url}/repos/{owner}/{repo}/git/{kind}/{reference}"
    //
    // path_segments_mut percent-encodes each segment, so a branch name
    // with a '/' can't escape its slot.
    fn endpoint(&self, kind: &str, reference: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "git", kind, reference]);
        }
        url
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, RemoteError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer GitHub's own explanation ("API rate limit exceeded ...")
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(RemoteError::Status { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TemplateSource for GitHubClient {
    async fn get_tree(&self, branch: &str) -> Result<Tree, RemoteError> {
        self.get_json(self.endpoint("trees", branch)).await
    }

    async fn get_blob(&self, sha: &str) -> Result<Blob, RemoteError> {
        self.get_json(self.endpoint("blobs", sha)).await
    }
}
