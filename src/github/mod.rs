// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// Currently implements:
// - Parsing GitHub URLs to extract owner/repo
// - A REST client for repository metadata, recursive trees and file contents
// - Access checks, file listing and base64 decoding on top of that client
//
// Everything goes through the authenticated REST API, so private repos work
// as long as the token can see them.
// =============================================================================

mod api;
mod repo;
mod types;
mod repo_url;

#[cfg(test)]
pub mod testing;

pub use api::{GitHubClient, RepoApi};
pub use repo::{check_access, fetch_file_text, list_files, FileListing};
pub use types::FileEntry;
pub use repo_url::{parse_github_url, RepoRef};
