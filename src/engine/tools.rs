//! Path and filter utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::STOP_MARKER;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Final path component as an owned string (lossy), empty for `/` or `..`.
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" | "$RECYCLE.BIN" => true,
            // Linux
            ".directory" => true,
            _ => {
                // macOS resource fork files start with ._ (e.g. `._01 - Intro.mp4`)
                name.starts_with("._") || name.starts_with(".Trash-")
            }
        }
    } else {
        false
    }
}

/// True if `path` has one of `extensions` (lowercase, with leading dot), compared case-insensitively.
pub fn has_video_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = format!(".{}", ext.to_lowercase());
    extensions.iter().any(|e| *e == ext)
}

/// Playable video: a regular file with a configured extension that is not an OS artefact.
pub fn is_video_file(path: &Path, is_file: bool, extensions: &[String]) -> bool {
    is_file && !is_os_hidden_file(path) && has_video_extension(path, extensions)
}

/// True if `dir` directly contains the stop-descent marker.
pub fn has_stop_marker(dir: &Path) -> bool {
    dir.join(STOP_MARKER).is_file()
}

/// One child of a directory listing.
#[derive(Clone, Debug)]
pub struct DirChild {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_file: bool,
}

/// List the direct children of `dir`, sorted by name so callers never depend on
/// filesystem iteration order. Children whose metadata cannot be read are dropped.
pub fn read_dir_sorted(dir: &Path, follow_links: bool) -> Result<Vec<DirChild>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let path = entry.path();
        let file_type = if follow_links {
            match fs::metadata(&path) {
                Ok(m) => m.file_type(),
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }
        } else {
            match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            }
        };
        children.push(DirChild {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
        });
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Validate a user-chosen root before any traversal: it must exist and be a directory.
pub fn check_root_and_canonicalize(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("directory does not exist: {}", path.display()))?;
    if !canonical.is_dir() {
        anyhow::bail!("not a directory: {}", path.display());
    }
    Ok(canonical)
}
