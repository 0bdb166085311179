// src/github/repo.rs
// =============================================================================
// Repository-level operations built on top of `RepoApi`:
//
// - check_access:    can this token read the repo? (denied is not an error)
// - list_files:      metadata -> branch -> recursive tree -> plain files
// - fetch_file_text: one file's contents, base64-decoded into text
// =============================================================================

use super::api::RepoApi;
use super::types::{Contents, FileEntry};
use super::repo_url::RepoRef;
use crate::error::ExtractError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info, warn};

// Asks GitHub for the repository metadata and interprets the answer
//
// Returns:
//   Ok(true)  = the token can read the repo
//   Ok(false) = GitHub said 403 or 404
//   Err       = anything else (network trouble, 5xx, garbage response)
pub async fn check_access<A: RepoApi>(api: &A, repo: &RepoRef) -> Result<bool, ExtractError> {
    match api.repository(repo).await {
        Ok(_) => Ok(true),
        Err(e) if e.is_access_denied() => {
            info!("No access to {}: {}", repo, e);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

// The branch that was read and the files found on it
#[derive(Debug, Clone)]
pub struct FileListing {
    pub branch: String,
    pub files: Vec<FileEntry>,
}

// Lists every regular file on a branch, in the order GitHub returns them
//
// The metadata call always happens first: it doubles as the access check and
// tells us the default branch when the caller didn't pick one. Directories
// and submodules are dropped, as are names on the denylist.
pub async fn list_files<A: RepoApi>(
    api: &A,
    repo: &RepoRef,
    branch: Option<&str>,
    denylist: &[String],
) -> Result<FileListing, ExtractError> {
    let metadata = api.repository(repo).await?;
    let branch = match branch {
        Some(b) => b.to_string(),
        None => metadata.default_branch,
    };
    debug!("Reading {} at branch '{}'", repo, branch);

    let tree = api.tree(repo, &branch).await?;
    if tree.truncated {
        // Still plenty for a 50-file window, but worth knowing about
        warn!("GitHub truncated the tree listing for {}", repo);
    }

    let files: Vec<FileEntry> = tree
        .tree
        .iter()
        .filter(|item| item.is_blob())
        .filter(|item| !denylist.iter().any(|d| d == item.name()))
        .map(FileEntry::from)
        .collect();

    info!("Found {} file(s) in {}@{}", files.len(), repo, branch);
    Ok(FileListing { branch, files })
}

// Downloads one file and returns it as text
//
// Invalid UTF-8 sequences become U+FFFD instead of failing the file.
pub async fn fetch_file_text<A: RepoApi>(
    api: &A,
    repo: &RepoRef,
    branch: &str,
    path: &str,
) -> Result<String, ExtractError> {
    let contents = api.contents(repo, branch, path).await?;
    decode_contents(&contents)
}

fn decode_contents(contents: &Contents) -> Result<String, ExtractError> {
    if contents.encoding != "base64" {
        return Err(ExtractError::InvalidResponse(format!(
            "unsupported content encoding '{}'",
            contents.encoding
        )));
    }

    // GitHub wraps the base64 payload at 60 columns
    let compact: String = contents
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ExtractError::InvalidResponse(format!("bad base64 content: {}", e)))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `Err(e) if e.is_access_denied()`?
//    - A match guard: the arm only matches when the condition is true
//    - Other errors fall through to the next arm and get returned
//
// 2. Why filter out whitespace before decoding?
//    - GitHub inserts a newline every 60 characters of base64
//    - The base64 engine rejects anything outside the alphabet
//
// 3. What does from_utf8_lossy return?
//    - A Cow<str>: borrowed if the bytes were valid, owned if it had to fix them
//    - into_owned() turns either case into a String
// -----------------------------------------------------------------------------
