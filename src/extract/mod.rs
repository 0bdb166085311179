// src/extract/mod.rs
// =============================================================================
// This module builds the combined text.
//
// Submodules:
// - format:   how one file is rendered (header, code, markers, line numbers)
// - pipeline: GitHub repository -> combined text
// - local:    files and folders on disk -> combined text
//
// Both variants produce exactly the same block format, so output from either
// can be pasted side by side.
// =============================================================================

mod format;
mod local;
mod pipeline;

pub use local::extract_local;
pub use pipeline::extract_repo;
