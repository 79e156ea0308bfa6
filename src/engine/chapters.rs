//! Chapter tree: mirror the folder hierarchy of the ordered videos.

use std::path::Path;

use super::tools::path_relative_to;
use crate::{Chapter, StructureClass, VideoFile};

/// Directory names from `root` down to the video's parent (empty for root-level videos).
fn parent_chain(video: &VideoFile, root: &Path) -> Vec<String> {
    path_relative_to(&video.path, root)
        .and_then(|rel| {
            rel.parent().map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
        })
        .unwrap_or_default()
}

fn attach(siblings: &mut Vec<Chapter>, dirs: &[String], video: VideoFile) {
    let Some((first, rest)) = dirs.split_first() else {
        return;
    };
    let idx = match siblings.iter().position(|c| c.name == *first) {
        Some(i) => i,
        None => {
            siblings.push(Chapter::named(first.clone()));
            siblings.len() - 1
        }
    };
    let chapter = &mut siblings[idx];
    if rest.is_empty() {
        chapter.videos.push(video);
    } else {
        attach(&mut chapter.sub_chapters, rest, video);
    }
}

/// Arrange `ordered_videos` into chapters, one per directory that directly holds videos,
/// nested the way the directories are.
///
/// Chapters appear in the order of their first video, so walking the tree depth-first visits
/// videos in episode order. This is ordinal order rather than plain name order: `10 - J` comes
/// after `2 - B`, and unnumbered directories come after numbered ones. Root-level videos go into an unnamed chapter placed first (the whole
/// tree for [`StructureClass::Flat`]). Directories without videos never become chapters.
/// An [`StructureClass::Unknown`] structure or an empty video list builds nothing.
pub fn build_chapters(
    root: &Path,
    structure: StructureClass,
    ordered_videos: Vec<VideoFile>,
) -> Vec<Chapter> {
    if !structure.is_known() || ordered_videos.is_empty() {
        return Vec::new();
    }

    let mut root_chapter = Chapter::named("");
    let mut chapters: Vec<Chapter> = Vec::new();
    for video in ordered_videos {
        let dirs = parent_chain(&video, root);
        if dirs.is_empty() {
            root_chapter.videos.push(video);
        } else {
            attach(&mut chapters, &dirs, video);
        }
    }
    if !root_chapter.videos.is_empty() {
        chapters.insert(0, root_chapter);
    }
    chapters
}

/// Total videos over a chapter list.
pub fn count_videos(chapters: &[Chapter]) -> usize {
    chapters.iter().map(Chapter::video_count).sum()
}
