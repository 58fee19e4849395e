//! GitHub REST API client for repository contents and blobs

use crate::error::{Error, Result};
use crate::http::listing::{decode_blob, decode_listing};
use crate::traits::RemoteAccessor;
use crate::types::{ObjectId, TreeEntry};
use async_trait::async_trait;

/// Default API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("treediff/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Contents/blobs client bound to one repository
pub struct GitHubContentsClient {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    token: String,
}

impl std::fmt::Debug for GitHubContentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubContentsClient")
            .field("base_url", &self.base_url)
            .field("repository", &self.repository)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubContentsClient {
    /// Create a client for `repository` (`owner/repo`)
    pub fn new(base_url: String, repository: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repository,
            token,
        }
    }

    /// Create from `GITHUB_API_URL` and `GITHUB_TOKEN`; a missing token is fatal
    pub fn from_env(repository: String) -> Result<Self> {
        let base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token = require_token(std::env::var("GITHUB_TOKEN").ok())?;

        Ok(Self::new(base_url, repository, token))
    }

    /// API root in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.base_url,
            self.repository,
            path.trim_matches('/')
        )
    }

    fn blob_url(&self, sha: &ObjectId) -> String {
        format!("{}/repos/{}/git/blobs/{}", self.base_url, self.repository, sha)
    }

    /// Authenticated GET returning the body of a successful response
    async fn get_authenticated(&self, url: &str, target: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
            .send()
            .await?;

        let response = check_status(response, target)?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Accept a configured token, treating unset and blank values alike
pub fn require_token(value: Option<String>) -> Result<String> {
    value
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::Config("Missing github token -> GITHUB_TOKEN".to_string()))
}

/// Map non-success responses to errors, recognising rate limiting
fn check_status(response: reqwest::Response, target: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok());

        if remaining == Some("0") {
            return Err(Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded while requesting {}",
                target
            )));
        }
    }

    Err(Error::Status {
        status: status.as_u16(),
        target: target.to_string(),
    })
}

#[async_trait]
impl RemoteAccessor for GitHubContentsClient {
    async fn list_or_get(&self, path: &str) -> Result<Vec<TreeEntry>> {
        let body = self.get_authenticated(&self.contents_url(path), path).await?;
        let entries = decode_listing(&body, path)?.into_entries();
        log::debug!("listed {} ({} entries)", path, entries.len());
        Ok(entries)
    }

    async fn fetch_raw(&self, locator: &str) -> Result<Vec<u8>> {
        // Raw download locators are pre-signed for public content; no auth header
        let response = self.client.get(locator).send().await?;
        let response = check_status(response, locator)?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_by_hash(&self, hash: &ObjectId) -> Result<String> {
        let body = self
            .get_authenticated(&self.blob_url(hash), hash.as_str())
            .await?;
        decode_blob(&body, hash.as_str())
    }
}
