// src/handler.rs
// =============================================================================
// The one operation callers see: "extract this repository for me".
//
// Shaped like a web request handler so it can sit behind any front end:
//
//   request  = method + repo URL + line-number flag + token (+ branch)
//   response = {"code": "..."}  or  {"error": "...", "status": 404}
//
// Checks happen in this order and all of them run before we touch GitHub:
//   method is POST (405) -> token present (401) -> URL present (400)
//   -> URL looks like github.com/<owner>/<repo> (400)
// =============================================================================

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extract::extract_repo;
use crate::github::{parse_github_url, RepoApi};
use log::{error, info};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub method: String,
    pub repo_url: Option<String>,
    pub include_line_numbers: bool,
    pub token: Option<String>,
    pub branch: Option<String>,
}

impl ExtractRequest {
    // A POST for `repo_url`, which is what the CLI always sends
    pub fn post(repo_url: &str, token: Option<String>) -> Self {
        Self {
            method: "POST".to_string(),
            repo_url: Some(repo_url.to_string()),
            include_line_numbers: false,
            token,
            branch: None,
        }
    }
}

// #[serde(untagged)] means each variant serializes as just its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Code { code: String },
    Error { error: String, status: u16 },
}

impl ExtractResponse {
    pub fn from_error(err: &ExtractError) -> Self {
        ExtractResponse::Error {
            error: err.user_message(),
            status: err.status_hint(),
        }
    }
}

// Runs one extraction request
//
// `connect` turns the caller's token into an API client. It is only called
// once the request has passed validation.
pub async fn handle<A, F>(
    request: &ExtractRequest,
    config: &ExtractConfig,
    connect: F,
) -> ExtractResponse
where
    A: RepoApi,
    F: FnOnce(&str) -> Result<A, ExtractError>,
{
    match run(request, config, connect).await {
        Ok(code) => ExtractResponse::Code { code },
        Err(e) => {
            if e.status_hint() >= 500 {
                error!("Extraction failed: {}", e);
            } else {
                info!("Extraction refused: {}", e);
            }
            ExtractResponse::from_error(&e)
        }
    }
}

async fn run<A, F>(
    request: &ExtractRequest,
    config: &ExtractConfig,
    connect: F,
) -> Result<String, ExtractError>
where
    A: RepoApi,
    F: FnOnce(&str) -> Result<A, ExtractError>,
{
    if !request.method.eq_ignore_ascii_case("POST") {
        return Err(ExtractError::MethodNotAllowed(request.method.clone()));
    }

    let token = request
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ExtractError::Unauthenticated)?;

    let url = request
        .repo_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ExtractError::MissingUrl)?;

    let repo = parse_github_url(url)?;
    let api = connect(token)?;

    let config = config.clone().with_line_numbers(request.include_line_numbers);
    extract_repo(&api, &repo, request.branch.as_deref(), &config).await
}
