// src/github/api.rs
// =============================================================================
// The three GitHub REST calls an extraction needs, behind a small trait.
//
//   GET /repos/{owner}/{repo}                                 -> metadata
//   GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1  -> file tree
//   GET /repos/{owner}/{repo}/contents/{path}?ref={branch}    -> one file
//
// GitHubClient is the real thing. The pipeline only sees `RepoApi`, which
// lets tests swap in an in-memory repository and count the calls made.
//
// Status handling lives here, in one place:
//   403 -> Forbidden, 404 -> NotFound,
//   other non-2xx -> Upstream (with GitHub's "message" when it sent one),
//   no response at all -> Network.
// =============================================================================

use super::types::{ApiErrorBody, Contents, RepoMetadata, Tree};
use super::repo_url::RepoRef;
use crate::error::ExtractError;
use anyhow::{anyhow, Context, Result};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// Anything that can answer the three questions an extraction asks
#[allow(async_fn_in_trait)]
pub trait RepoApi {
    async fn repository(&self, repo: &RepoRef) -> Result<RepoMetadata, ExtractError>;

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Tree, ExtractError>;

    async fn contents(
        &self,
        repo: &RepoRef,
        branch: &str,
        path: &str,
    ) -> Result<Contents, ExtractError>;
}

// Lets callers hand out a borrowed client where an owned one is expected
impl<T: RepoApi> RepoApi for &T {
    async fn repository(&self, repo: &RepoRef) -> Result<RepoMetadata, ExtractError> {
        (**self).repository(repo).await
    }

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Tree, ExtractError> {
        (**self).tree(repo, branch).await
    }

    async fn contents(
        &self,
        repo: &RepoRef,
        branch: &str,
        path: &str,
    ) -> Result<Contents, ExtractError> {
        (**self).contents(repo, branch, path).await
    }
}

pub struct GitHubClient {
    http: Client,
    base: Url,
}

impl GitHubClient {
    // Builds a client that sends `token` as a bearer credential on every call
    //
    // api_url is normally https://api.github.com; GitHub Enterprise lives at
    // https://<host>/api/v3
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let base = Url::parse(api_url)
            .with_context(|| format!("Invalid API URL '{}'", api_url))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("API URL '{}' cannot carry a path", api_url));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Access token contains characters not allowed in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("extractify"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, base })
    }

    // Appends path segments to the base URL, percent-encoding each one
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // Each path segment is encoded on its own so "/" keeps separating folders
    fn contents_url(&self, repo: &RepoRef, branch: &str, path: &str) -> Url {
        let segments = ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/'));
        let mut url = self.endpoint(segments);
        url.query_pairs_mut().append_pair("ref", branch);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ExtractError> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ExtractError::InvalidResponse(e.to_string()));
        }

        // Error bodies are best-effort; an unreadable one just loses the message
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body, what))
    }
}

impl RepoApi for GitHubClient {
    async fn repository(&self, repo: &RepoRef) -> Result<RepoMetadata, ExtractError> {
        let url = self.endpoint(["repos", repo.owner.as_str(), repo.repo.as_str()]);
        self.get_json(url, &repo.to_string()).await
    }

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Tree, ExtractError> {
        let mut url = self.endpoint([
            "repos",
            repo.owner.as_str(),
            repo.repo.as_str(),
            "git",
            "trees",
            branch,
        ]);
        url.query_pairs_mut().append_pair("recursive", "1");
        self.get_json(url, &format!("{}@{}", repo, branch)).await
    }

    async fn contents(
        &self,
        repo: &RepoRef,
        branch: &str,
        path: &str,
    ) -> Result<Contents, ExtractError> {
        let url = self.contents_url(repo, branch, path);
        self.get_json(url, path).await
    }
}

// Maps a non-2xx status to our error taxonomy
fn status_error(status: StatusCode, body: &str, what: &str) -> ExtractError {
    match status {
        StatusCode::FORBIDDEN => ExtractError::Forbidden(what.to_string()),
        StatusCode::NOT_FOUND => ExtractError::NotFound(what.to_string()),
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            ExtractError::Upstream {
                status: status.as_u16(),
                message,
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `async fn` directly in a trait?
//    - Since Rust 1.75 traits can declare async methods without extra crates
//    - We never box these or send them across threads, so the plain form works
//    - #[allow(async_fn_in_trait)] silences the lint that warns about Send bounds
//
// 2. Why `impl RepoApi for &T`?
//    - Code that wants an owned client can then be handed a borrowed one
//    - Tests use it to keep the fake around and inspect it afterwards
//
// 3. What is `path_segments_mut`?
//    - It edits the path of a Url one segment at a time
//    - Each segment is percent-encoded, so "my file.rs" becomes "my%20file.rs"
// -----------------------------------------------------------------------------
