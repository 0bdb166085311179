// src/github/testing.rs
// =============================================================================
// An in-memory GitHub repository for tests.
//
// Files are kept in insertion order, which is the order the fake "tree API"
// returns them in. Every call is recorded so tests can assert what was (and
// wasn't) requested.
// =============================================================================

use super::api::RepoApi;
use super::types::{Contents, RepoMetadata, Tree, TreeItem};
use super::repo_url::RepoRef;
use crate::error::ExtractError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct FakeRepo {
    default_branch: String,
    items: Vec<TreeItem>,
    contents: HashMap<String, Contents>,
    repo_status: Option<u16>,
    tree_status: Option<u16>,
    failing: HashMap<String, u16>,
    calls: Mutex<Calls>,
}

#[derive(Default)]
struct Calls {
    repository: usize,
    tree_branches: Vec<String>,
    contents: Vec<String>,
}

impl FakeRepo {
    pub fn new(default_branch: &str) -> Self {
        Self {
            default_branch: default_branch.to_string(),
            items: Vec::new(),
            contents: HashMap::new(),
            repo_status: None,
            tree_status: None,
            failing: HashMap::new(),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn with_text(mut self, path: &str, text: &str) -> Self {
        // Wrap like GitHub does so the decoder has to cope with newlines
        let encoded = STANDARD.encode(text.as_bytes());
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect::<Vec<_>>()
            .join("\n");

        self.items.push(TreeItem {
            path: path.to_string(),
            item_type: "blob".to_string(),
        });
        self.contents.insert(
            path.to_string(),
            Contents {
                content: wrapped,
                encoding: "base64".to_string(),
            },
        );
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.items.push(TreeItem {
            path: path.to_string(),
            item_type: "tree".to_string(),
        });
        self
    }

    pub fn with_repo_status(mut self, status: u16) -> Self {
        self.repo_status = Some(status);
        self
    }

    pub fn with_tree_status(mut self, status: u16) -> Self {
        self.tree_status = Some(status);
        self
    }

    pub fn with_failing_file(mut self, path: &str, status: u16) -> Self {
        self.failing.insert(path.to_string(), status);
        self
    }

    pub fn repository_calls(&self) -> usize {
        self.calls.lock().unwrap().repository
    }

    pub fn tree_calls(&self) -> usize {
        self.calls.lock().unwrap().tree_branches.len()
    }

    pub fn tree_branches(&self) -> Vec<String> {
        self.calls.lock().unwrap().tree_branches.clone()
    }

    pub fn contents_requests(&self) -> Vec<String> {
        self.calls.lock().unwrap().contents.clone()
    }
}

fn error_for(status: u16, what: &str) -> ExtractError {
    match status {
        403 => ExtractError::Forbidden(what.to_string()),
        404 => ExtractError::NotFound(what.to_string()),
        _ => ExtractError::Upstream {
            status,
            message: format!("fake failure {}", status),
        },
    }
}

impl RepoApi for FakeRepo {
    async fn repository(&self, repo: &RepoRef) -> Result<RepoMetadata, ExtractError> {
        self.calls.lock().unwrap().repository += 1;
        if let Some(status) = self.repo_status {
            return Err(error_for(status, &repo.to_string()));
        }
        Ok(RepoMetadata {
            default_branch: self.default_branch.clone(),
        })
    }

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Tree, ExtractError> {
        self.calls
            .lock()
            .unwrap()
            .tree_branches
            .push(branch.to_string());
        if let Some(status) = self.tree_status {
            return Err(error_for(status, &repo.to_string()));
        }
        Ok(Tree {
            tree: self.items.clone(),
            truncated: false,
        })
    }

    async fn contents(
        &self,
        _repo: &RepoRef,
        _branch: &str,
        path: &str,
    ) -> Result<Contents, ExtractError> {
        self.calls.lock().unwrap().contents.push(path.to_string());
        if let Some(status) = self.failing.get(path) {
            return Err(error_for(*status, path));
        }
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| error_for(404, path))
    }
}
