// src/github/types.rs
// =============================================================================
// The slices of GitHub's JSON responses that we actually read.
//
// serde ignores every field we don't declare, so these stay small.
// =============================================================================

use serde::Deserialize;

// GET /repos/{owner}/{repo}
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    pub default_branch: String,
}

// One item of GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
#[derive(Debug, Clone, Deserialize)]
pub struct TreeItem {
    pub path: String,
    /// "blob", "tree" or "commit" (submodule)
    #[serde(rename = "type")]
    pub item_type: String,
}

impl TreeItem {
    pub fn is_blob(&self) -> bool {
        self.item_type == "blob"
    }

    /// Last path segment
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[derive(Debug, Deserialize)]
pub struct Tree {
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

// GET /repos/{owner}/{repo}/contents/{path}
#[derive(Debug, Clone, Deserialize)]
pub struct Contents {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

// Body GitHub sends with most error statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

// A file chosen for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
}

impl From<&TreeItem> for FileEntry {
    fn from(item: &TreeItem) -> Self {
        FileEntry {
            path: item.path.clone(),
            name: item.name().to_string(),
        }
    }
}
