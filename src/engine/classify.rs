//! Structure classification: where do the videos of a variant directory physically live?

use log::{debug, info, warn};
use std::path::Path;

use super::tools::{DirChild, has_stop_marker, is_video_file, path_relative_to, read_dir_sorted};
use crate::{Opts, StructureClass, VideoFile};

/// What one subdirectory shows about the tree's depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Evidence {
    None,
    /// Videos directly inside the subdirectory.
    VideosHere,
    /// A nested directory, with or without videos of its own.
    NestedDir,
}

/// Subdirectories that take part in classification and collection.
/// Language-variant names re-occurring below the variant root and stop-marked directories are left out.
pub fn eligible_subdirs<'a>(
    children: &'a [DirChild],
    opts: &'a Opts,
) -> impl Iterator<Item = &'a DirChild> + 'a {
    children.iter().filter(move |c| {
        c.is_dir
            && !opts.is_language_dir(&c.name)
            && !(opts.check_stop_marker && has_stop_marker(&c.path))
    })
}

fn has_direct_video(children: &[DirChild], opts: &Opts) -> bool {
    children
        .iter()
        .any(|c| is_video_file(&c.path, c.is_file, &opts.video_extensions))
}

fn list_or_warn(dir: &Path, opts: &Opts) -> Option<Vec<DirChild>> {
    match read_dir_sorted(dir, opts.follow_links) {
        Ok(children) => Some(children),
        Err(e) => {
            warn!("Cannot classify {}: {:#}", dir.display(), e);
            None
        }
    }
}

fn subdir_evidence(dir: &Path, opts: &Opts) -> Evidence {
    let Some(children) = list_or_warn(dir, opts) else {
        return Evidence::None;
    };
    if eligible_subdirs(&children, opts).next().is_some() {
        return Evidence::NestedDir;
    }
    if has_direct_video(&children, opts) {
        Evidence::VideosHere
    } else {
        Evidence::None
    }
}

/// Classify `root` by where its videos live.
///
/// Videos directly in `root` make it [`StructureClass::Flat`], or [`StructureClass::Mixed`] when
/// some subdirectory holds videos too. Otherwise subdirectories are inspected in name order and
/// the first one with any evidence decides: a further subdirectory (even an empty one) gives
/// [`StructureClass::NestedTwo`], videos one level down give [`StructureClass::NestedOne`].
/// No evidence anywhere gives [`StructureClass::Unknown`].
pub fn classify(root: &Path, opts: &Opts) -> StructureClass {
    let Some(children) = list_or_warn(root, opts) else {
        return StructureClass::Unknown;
    };

    if has_direct_video(&children, opts) {
        let subdir_videos = eligible_subdirs(&children, opts).any(|sub| {
            list_or_warn(&sub.path, opts).is_some_and(|c| has_direct_video(&c, opts))
        });
        let class = if subdir_videos {
            StructureClass::Mixed
        } else {
            StructureClass::Flat
        };
        debug!("{}: {}", root.display(), class);
        return class;
    }

    for sub in eligible_subdirs(&children, opts) {
        let class = match subdir_evidence(&sub.path, opts) {
            Evidence::NestedDir => StructureClass::NestedTwo,
            Evidence::VideosHere => StructureClass::NestedOne,
            Evidence::None => continue,
        };
        debug!("{}: {} (decided by {})", root.display(), class, sub.name);
        return class;
    }

    info!("No video structure detected in {}", root.display());
    StructureClass::Unknown
}

/// Classify from the levels of already collected videos (nested layout, where depth is
/// configurable and videos may sit deeper than two levels).
pub fn classify_collected(root: &Path, videos: &[VideoFile]) -> StructureClass {
    let levels = videos.iter().filter_map(|v| {
        path_relative_to(&v.path, root).map(|rel| rel.components().count().saturating_sub(1))
    });
    let (mut has_root, mut max_level, mut any) = (false, 0, false);
    for level in levels {
        any = true;
        has_root |= level == 0;
        max_level = max_level.max(level);
    }
    match (any, has_root, max_level) {
        (false, _, _) => StructureClass::Unknown,
        (true, true, 0) => StructureClass::Flat,
        (true, true, _) => StructureClass::Mixed,
        (true, false, 1) => StructureClass::NestedOne,
        _ => StructureClass::NestedTwo,
    }
}
