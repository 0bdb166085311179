// src/github/repo_url.rs
// =============================================================================
// Turns a GitHub URL into an owner/repo pair.
//
// Anything that contains "github.com/<owner>/<repo>" is accepted:
//   https://github.com/rust-lang/rust
//   https://github.com/user/repo.git
//   github.com/user/repo/tree/main/src     (extra segments are ignored)
//
// We don't normalize case, scheme or trailing slashes. Each segment is just
// "everything up to the next slash", and a trailing ".git" is dropped from
// the repo name.
// =============================================================================

use crate::error::ExtractError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static GITHUB_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("valid regex"));

// Identifies one repository on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// Parses a GitHub URL to extract owner and repository name
//
// Example:
//   "https://github.com/rust-lang/rust" -> RepoRef { owner: "rust-lang", repo: "rust" }
pub fn parse_github_url(url: &str) -> Result<RepoRef, ExtractError> {
    let caps = GITHUB_URL
        .captures(url)
        .ok_or_else(|| ExtractError::InvalidUrl(url.to_string()))?;

    let owner = caps[1].to_string();
    let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]).to_string();

    // "github.com/user/.git" would leave an empty repo name
    if repo.is_empty() {
        return Err(ExtractError::InvalidUrl(url.to_string()));
    }

    Ok(RepoRef { owner, repo })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A value computed the first time it's used, then shared forever
//    - Compiling a regex is slow, so we only want to do it once
//
// 2. What does caps[1] mean?
//    - The text matched by the first (...) group in the pattern
//    - caps[0] would be the whole match
//
// 3. Why strip_suffix instead of trim_end_matches?
//    - strip_suffix removes ".git" once; trim_end_matches would keep going
//    - "repo.git.git" should stay "repo.git"
// -----------------------------------------------------------------------------
