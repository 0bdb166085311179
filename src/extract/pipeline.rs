// src/extract/pipeline.rs
// =============================================================================
// Remote extraction: GitHub repository -> one combined text.
//
// Steps:
// 1. List the branch's files (metadata call first, then the recursive tree)
// 2. Keep the first `max_files` of them, in tree order
// 3. For each kept file: images get a marker, everything else is downloaded,
//    decoded and formatted
// 4. Glue the blocks together in the same order
//
// A file that fails to download is logged and left out. It never fails the
// whole extraction. Errors from step 1 do.
//
// Downloads run one at a time by default. With concurrency > 1 we keep up to
// that many in flight, and `buffered` (unlike `buffer_unordered`) still hands
// results back in the original order.
// =============================================================================

use super::format::{format_block, Body, Omission};
use crate::config::{has_extension_in, ExtractConfig};
use crate::error::ExtractError;
use crate::github::{fetch_file_text, list_files, FileEntry, FileListing, RepoApi, RepoRef};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

pub async fn extract_repo<A: RepoApi>(
    api: &A,
    repo: &RepoRef,
    branch: Option<&str>,
    config: &ExtractConfig,
) -> Result<String, ExtractError> {
    let FileListing { branch, files } =
        list_files(api, repo, branch, &config.remote_denylist).await?;

    let found = files.len();
    let selected: Vec<FileEntry> = files.into_iter().take(config.max_files).collect();
    if found > selected.len() {
        info!(
            "Repository has {} files, only the first {} are included",
            found,
            selected.len()
        );
    }

    let blocks: Vec<Option<String>> = stream::iter(selected.iter())
        .map(|entry| render_remote_file(api, repo, &branch, entry, config))
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    let included = blocks.iter().filter(|b| b.is_some()).count();
    info!("Extracted {} of {} selected file(s)", included, selected.len());

    Ok(blocks.into_iter().flatten().collect())
}

// Produces the block for one file, or None if it had to be skipped
async fn render_remote_file<A: RepoApi>(
    api: &A,
    repo: &RepoRef,
    branch: &str,
    entry: &FileEntry,
    config: &ExtractConfig,
) -> Option<String> {
    let line_numbers = config.include_line_numbers;

    // Images are never downloaded
    if has_extension_in(&entry.name, &config.remote_image_extensions) {
        debug!("Image {} omitted", entry.path);
        let body = Body::Omitted(Omission::Image);
        return Some(format_block(&entry.name, &entry.path, &body, line_numbers));
    }

    match fetch_file_text(api, repo, branch, &entry.path).await {
        Ok(text) => {
            debug!("Fetched {} ({} bytes)", entry.path, text.len());
            Some(format_block(
                &entry.name,
                &entry.path,
                &Body::Text(text),
                line_numbers,
            ))
        }
        Err(e) => {
            warn!("Skipping {}: {}", entry.path, e);
            None
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered?
//    - Both keep up to N futures running at once
//    - buffered yields results in the order the futures were created
//    - buffer_unordered yields them as they finish, which would shuffle files
//
// 2. Why return Option<String> per file?
//    - None means "skipped"; flatten() then drops those while collecting
//    - A failed download never turns into an error for the whole run
// -----------------------------------------------------------------------------
