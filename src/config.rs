// src/config.rs
// =============================================================================
// Knobs that shape an extraction.
//
// Nothing in here is state: an ExtractConfig is built once from the command
// line and handed to the pipeline for a single run.
//
// The remote and local skip-lists are intentionally kept apart. GitHub runs
// only ever skip image files; the local folder path also skips archives,
// fonts, office documents and executables because it has no content-type
// hints to go on.
// =============================================================================

/// Maximum number of files included in one extraction
pub const MAX_FILES: usize = 50;

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// File names never included from a remote repository
pub const REMOTE_DENYLIST: &[&str] = &["package-lock.json"];

/// Extensions treated as images (both variants)
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp", "svg", "ico",
];

/// Extra extensions the local variant refuses to read as text
pub const LOCAL_BINARY_EXTENSIONS: &[&str] = &[
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar",
    // executables and libraries
    "exe", "dll", "so", "dylib", "bin", "o", "a", "class", "jar", "pyc", "wasm",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // office documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // media
    "mp3", "mp4", "wav", "avi", "mov", "mkv", "flac", "ogg",
];

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub max_files: usize,
    pub include_line_numbers: bool,
    /// How many blob fetches may be in flight at once (1 = strictly sequential)
    pub concurrency: usize,
    pub remote_denylist: Vec<String>,
    pub remote_image_extensions: Vec<String>,
    pub local_image_extensions: Vec<String>,
    pub local_binary_extensions: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            include_line_numbers: false,
            concurrency: 1,
            remote_denylist: to_owned_list(REMOTE_DENYLIST),
            remote_image_extensions: to_owned_list(IMAGE_EXTENSIONS),
            local_image_extensions: to_owned_list(IMAGE_EXTENSIONS),
            local_binary_extensions: to_owned_list(LOCAL_BINARY_EXTENSIONS),
        }
    }
}

impl ExtractConfig {
    pub fn with_line_numbers(mut self, include_line_numbers: bool) -> Self {
        self.include_line_numbers = include_line_numbers;
        self
    }

    // Zero would stall the fetch stream, so clamp to at least one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lowercased extension of the last path segment, if any
pub fn extension_of(name: &str) -> Option<String> {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        // ".gitignore" has no extension, "foo." neither
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn has_extension_in(name: &str, list: &[String]) -> bool {
    match extension_of(name) {
        Some(ext) => list.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}
