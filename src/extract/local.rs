// src/extract/local.rs
// =============================================================================
// Local extraction: files and folders on disk -> one combined text.
//
// The input is a list of items, the same thing you'd get from dropping a few
// folders and files at once. Folders are flattened depth-first into
// (path, file) pairs where the path starts with the dropped folder's own name:
//
//   extractify local ./my-app      ->  my-app/Cargo.toml, my-app/src/main.rs, ...
//
// Nothing is uploaded anywhere; files are only read from disk.
//
// Rust concepts:
// - walkdir iterates a folder tree without recursion, so a deeply nested
//   tree can't blow the call stack
// - A labeled loop ('items) so the file limit can stop every level at once
// =============================================================================

use super::format::{format_block, Body, Omission};
use crate::config::{has_extension_in, ExtractConfig};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// One file found during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Slash-separated display path, starting at the dropped item's name
    pub path: String,
    /// Where to read it from
    pub file: PathBuf,
}

impl LocalFile {
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

// Flattens the given items into at most `limit` files
//
// Items are visited in the order given; inside a folder walkdir goes
// depth-first with children sorted by name, so two runs over the same tree
// produce the same list. Only regular files are kept: symlinks inside
// folders, FIFOs, sockets and device nodes are skipped. A missing top-level
// item is an error, an unreadable entry further down is only a warning.
pub fn collect_files(items: &[PathBuf], limit: usize) -> Result<Vec<LocalFile>> {
    let mut files = Vec::new();

    'items: for item in items {
        // Fail loudly on a typo before anything is walked
        fs::metadata(item).with_context(|| format!("Cannot access '{}'", item.display()))?;
        let root_name = item_name(item)?;

        let walker = WalkDir::new(item).follow_links(false).sort_by_file_name();
        for entry in walker {
            if files.len() >= limit {
                debug!("File limit of {} reached, stopping traversal", limit);
                break 'items;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Reading a FIFO or a device would block forever
            if !entry.file_type().is_file() {
                if !entry.file_type().is_dir() {
                    debug!("Skipping {} (not a regular file)", entry.path().display());
                }
                continue;
            }

            let relative = entry.path().strip_prefix(item).unwrap_or(entry.path());
            files.push(LocalFile {
                path: display_path(&root_name, relative),
                file: entry.into_path(),
            });
        }
    }

    Ok(files)
}

// The name an item shows up under; "." and ".." have none of their own
fn item_name(item: &Path) -> Result<String> {
    match item.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => fs::canonicalize(item)?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Cannot name '{}'", item.display())),
    }
}

// "proj" + "src/main.rs" -> "proj/src/main.rs", always with forward slashes
fn display_path(root_name: &str, relative: &Path) -> String {
    let mut path = root_name.to_string();
    for component in relative.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    path
}

// Decides what goes under "File Code:" for one local file
fn read_body(file: &LocalFile, config: &ExtractConfig) -> Body {
    let name = file.name();
    if has_extension_in(name, &config.local_image_extensions) {
        return Body::Omitted(Omission::Image);
    }
    if has_extension_in(name, &config.local_binary_extensions) {
        return Body::Omitted(Omission::Binary);
    }

    match fs::read(&file.file).map(String::from_utf8) {
        Ok(Ok(text)) => Body::Text(text),
        Ok(Err(_)) => {
            warn!("{} is not valid UTF-8", file.path);
            Body::Omitted(Omission::Unreadable)
        }
        Err(e) => {
            warn!("Cannot read {}: {}", file.path, e);
            Body::Omitted(Omission::Unreadable)
        }
    }
}

// Builds the combined text for local items
//
// `progress` is called with a percentage after every file and always ends
// at 100. It never goes down.
pub fn extract_local<F>(
    items: &[PathBuf],
    config: &ExtractConfig,
    mut progress: F,
) -> Result<String>
where
    F: FnMut(u8),
{
    let files = collect_files(items, config.max_files)?;
    info!("Reading {} local file(s)", files.len());

    let total = files.len();
    let mut combined = String::new();
    for (i, file) in files.iter().enumerate() {
        let body = read_body(file, config);
        combined.push_str(&format_block(
            file.name(),
            &file.path,
            &body,
            config.include_line_numbers,
        ));
        progress(((i + 1) * 100 / total) as u8);
    }

    if total == 0 {
        progress(100);
    }
    Ok(combined)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why check `is_file()` instead of "not a directory"?
//    - Folders can also hold FIFOs, sockets and device nodes
//    - fs::read on a FIFO waits for a writer that may never come
//    - Only regular files are safe to read start to finish
//
// 2. What does `map(String::from_utf8)` give us?
//    - fs::read returns Result<Vec<u8>, io::Error>
//    - Mapping with from_utf8 nests a second Result inside
//    - One match then handles "read fine", "not UTF-8" and "couldn't read"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, bytes: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_depth_first_in_name_order() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        write(&root, "b.txt", b"b");
        write(&root, "a/z.txt", b"z");
        write(&root, "a/deep/x.txt", b"x");
        write(&root, "c/y.txt", b"y");

        let files = collect_files(&[root], 50).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["proj/a/deep/x.txt", "proj/a/z.txt", "proj/b.txt", "proj/c/y.txt"]
        );
    }

    #[test]
    fn test_multiple_items_keep_their_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "zeta.txt", b"z");
        write(dir.path(), "alpha/one.txt", b"1");

        let items = vec![dir.path().join("zeta.txt"), dir.path().join("alpha")];
        let files = collect_files(&items, 50).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["zeta.txt", "alpha/one.txt"]);
    }

    #[test]
    fn test_limit_applies_to_flattened_list() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("many");
        for i in 0..60 {
            write(&root, &format!("sub{}/f{:02}.txt", i % 3, i), b"x");
        }
        let files = collect_files(&[root], 50).unwrap();
        assert_eq!(files.len(), 50);
    }

    #[test]
    fn test_missing_item_is_error() {
        let dir = tempdir().unwrap();
        assert!(collect_files(&[dir.path().join("nope")], 50).is_err());
    }

    #[test]
    fn test_extract_local_markers() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("site");
        write(&root, "index.html", b"<p>hi</p>");
        write(&root, "logo.PNG", &[0x89, b'P', b'N', b'G']);
        write(&root, "fonts/a.woff2", &[0, 1, 2]);
        write(&root, "data.dat", &[0xFF, 0xFE, 0x00]);

        let config = ExtractConfig::default();
        let text = extract_local(&[root], &config, |_| {}).unwrap();

        assert!(text.contains("File name: a.woff2\nFile path: site/fonts/a.woff2\n"));
        assert!(text.contains("fonts/a.woff2\nFile Code:\n[Binary content omitted]\n\n"));
        assert!(text.contains("File path: site/logo.PNG\nFile Code:\n[Image content omitted]\n\n"));
        assert!(text.contains(
            "File path: site/data.dat\nFile Code:\n[Content could not be read]\n\n"
        ));
        assert!(text.contains("File path: site/index.html\nFile Code:\n<p>hi</p>\n\n"));
    }

    #[test]
    fn test_extract_local_line_numbers() {
        let dir = tempdir().unwrap();
        write(dir.path(), "notes.md", b"one\ntwo");

        let config = ExtractConfig::default().with_line_numbers(true);
        let text = extract_local(&[dir.path().join("notes.md")], &config, |_| {}).unwrap();
        assert_eq!(
            text,
            "\nFile name: notes.md\nFile path: notes.md\nFile Code:\n1: one\n2: two\n\n"
        );
    }

    #[test]
    fn test_progress_is_monotonic_and_finishes() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("p");
        for i in 0..7 {
            write(&root, &format!("f{}.txt", i), b"x");
        }

        let mut seen = Vec::new();
        extract_local(&[root], &ExtractConfig::default(), |p| seen.push(p)).unwrap();

        assert_eq!(seen.len(), 7);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn test_progress_on_empty_folder() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("empty");
        fs::create_dir_all(&root).unwrap();

        let mut seen = Vec::new();
        let text = extract_local(&[root], &ExtractConfig::default(), |p| seen.push(p)).unwrap();
        assert!(text.is_empty());
        assert_eq!(seen, vec![100]);
    }

    #[test]
    fn test_display_path_uses_forward_slashes() {
        let relative: PathBuf = ["src", "bin", "main.rs"].iter().collect();
        assert_eq!(display_path("proj", &relative), "proj/src/bin/main.rs");
        assert_eq!(display_path("notes.md", Path::new("")), "notes.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_inside_folder_does_not_block() {
        use std::process::Command;
        use std::sync::mpsc;
        use std::time::Duration;

        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        write(&root, "a.txt", b"hello");
        let status = Command::new("mkfifo").arg(root.join("pipe")).status().unwrap();
        assert!(status.success());

        // Run on a thread so a regression fails the test instead of hanging it
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = extract_local(&[root], &ExtractConfig::default(), |_| {});
            let _ = tx.send(result.map_err(|e| e.to_string()));
        });

        let text = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("extraction blocked on a FIFO")
            .unwrap();
        assert!(text.contains("File path: proj/a.txt\nFile Code:\nhello\n\n"));
        assert!(!text.contains("pipe"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_folder_keeps_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        write(&root, "locked/secret.txt", b"s");
        write(&root, "ok.txt", b"ok");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = collect_files(&[root], 50);
        // restore so tempdir can clean up
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files = result.unwrap();
        assert!(files.iter().any(|f| f.path == "proj/ok.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_inside_folders_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("r");
        write(&root, "real.txt", b"x");
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();

        let files = collect_files(&[root], 50).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "r/real.txt");
    }
}
