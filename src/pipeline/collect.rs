//! Video collection: walk a variant directory and gather every qualifying video file.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::error_handler::SkippedPaths;
use crate::engine::tools::{file_name_string, has_stop_marker, is_video_file};
use crate::{Opts, StructureClass, VideoFile};

/// Which directory levels below the root contribute videos (0 = the root itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectScope {
    pub min_level: usize,
    pub max_level: usize,
}

impl CollectScope {
    /// Every level, no bound.
    pub fn unbounded() -> Self {
        Self {
            min_level: 0,
            max_level: usize::MAX,
        }
    }

    /// Levels 0 through `depth` inclusive (nested layout).
    pub fn up_to(depth: usize) -> Self {
        Self {
            min_level: 0,
            max_level: depth,
        }
    }

    /// The levels a classified tree keeps videos at, so every collected video lands in a chapter.
    pub fn for_structure(structure: StructureClass) -> Option<Self> {
        structure
            .video_levels()
            .map(|(min_level, max_level)| Self {
                min_level,
                max_level,
            })
    }
}

/// One result from the directory walk: either an entry to consider or an error with optional path.
enum WalkOutcome {
    Ok(DirEntry),
    Err { msg: String, path: Option<PathBuf> },
}

fn to_outcome_walkdir(r: Result<DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok(entry),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Directories below the root are descended unless they are a re-occurring language-variant
/// directory or (when enabled) hold the stop marker.
fn should_descend(entry: &DirEntry, opts: &Opts) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    let name = file_name_string(entry.path());
    if opts.is_language_dir(&name) {
        debug!("Not descending into language directory {}", entry.path().display());
        return false;
    }
    if opts.check_stop_marker && has_stop_marker(entry.path()) {
        debug!("Stop marker in {}", entry.path().display());
        return false;
    }
    true
}

/// Collect videos under `root` within `scope`. Episode numbers are left unassigned.
///
/// Read-only. A directory that cannot be read is recorded in `skipped` and contributes nothing;
/// the walk continues with its siblings. Result order is the walk order (name-sorted), which the
/// ordering step does not depend on.
pub fn collect_videos(
    root: &Path,
    opts: &Opts,
    scope: CollectScope,
    skipped: &mut SkippedPaths,
) -> Vec<VideoFile> {
    if opts.check_stop_marker && has_stop_marker(root) {
        debug!("Stop marker in {}, nothing collected", root.display());
        return Vec::new();
    }

    let walker = WalkDir::new(root)
        .follow_links(opts.follow_links)
        .min_depth(1)
        // A file at walk depth d sits in a directory at level d - 1.
        .max_depth(scope.max_level.saturating_add(1))
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| should_descend(e, opts))
        .map(to_outcome_walkdir);

    let mut videos = Vec::new();
    for outcome in walker {
        match outcome {
            WalkOutcome::Ok(entry) => {
                let level = entry.depth() - 1;
                if level < scope.min_level {
                    continue;
                }
                // With follow_links the file type is already the link target's.
                if is_video_file(entry.path(), entry.file_type().is_file(), &opts.video_extensions) {
                    videos.push(VideoFile::new(entry.into_path()));
                }
            }
            WalkOutcome::Err { msg, path } => {
                let path = path.unwrap_or_else(|| root.to_path_buf());
                skipped.record(&path, msg);
            }
        }
    }
    debug!("Collected {} videos under {}", videos.len(), root.display());
    videos
}
