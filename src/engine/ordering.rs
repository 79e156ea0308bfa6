//! Episode ordering: a total order over a variant's videos that depends only on names.

use std::path::Path;

use super::numbering::{extract_number, extract_number_tuple};
use super::tools::{file_name_string, path_relative_to};
use crate::VideoFile;

/// How directory and file names turn into ordinals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderingMode {
    /// Classified trees: one ordinal per name (leading digit run).
    Levels,
    /// Nested layout: dotted ordinal tuples, directory chain padded to `depth` levels.
    Depth(usize),
}

/// Ordinal plus lowercase name for one path component.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameKey {
    ordinal: Vec<u64>,
    lower: String,
}

impl NameKey {
    pub fn new(name: &str, mode: OrderingMode) -> Self {
        let ordinal = match mode {
            OrderingMode::Levels => vec![extract_number(name)],
            OrderingMode::Depth(_) => extract_number_tuple(name),
        };
        Self {
            ordinal,
            lower: name.to_lowercase(),
        }
    }

    /// Stand-in for a missing directory level in depth mode. Sorts before any real directory.
    fn padding() -> Self {
        Self {
            ordinal: vec![0],
            lower: String::new(),
        }
    }
}

/// Composite sort key: ancestor directories outermost first, then the file, then the path itself.
///
/// Root-level videos have no ancestor component (or only padding), so they sort before every
/// video in a named subdirectory. Videos of one directory stay contiguous because the directory
/// name is part of each level's key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    dirs: Vec<NameKey>,
    file: NameKey,
    rel_lower: String,
    rel: String,
}

impl SortKey {
    pub fn for_video(video: &VideoFile, root: &Path, mode: OrderingMode) -> Self {
        let rel = path_relative_to(&video.path, root).unwrap_or_else(|| video.path.clone());
        let mut dirs: Vec<NameKey> = rel
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| NameKey::new(&c.as_os_str().to_string_lossy(), mode))
                    .collect()
            })
            .unwrap_or_default();
        if let OrderingMode::Depth(depth) = mode {
            dirs.truncate(depth);
            while dirs.len() < depth {
                dirs.push(NameKey::padding());
            }
        }
        let rel = rel.to_string_lossy().into_owned();
        Self {
            dirs,
            file: NameKey::new(&video.name, mode),
            rel_lower: rel.to_lowercase(),
            rel,
        }
    }
}

/// Sort `videos` and assign 1-based global episode numbers in that order.
///
/// The result is a pure function of the paths relative to `root`: input order and
/// filesystem iteration order never matter.
pub fn order_videos(mut videos: Vec<VideoFile>, root: &Path, mode: OrderingMode) -> Vec<VideoFile> {
    videos.sort_by_cached_key(|v| SortKey::for_video(v, root, mode));
    for (i, video) in videos.iter_mut().enumerate() {
        video.episode = i + 1;
    }
    log::debug!(
        "Ordered {} videos under {} ({:?})",
        videos.len(),
        file_name_string(root),
        mode
    );
    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn videos(root: &Path, rels: &[&str]) -> Vec<VideoFile> {
        rels.iter().map(|r| VideoFile::new(root.join(r))).collect()
    }

    fn names(ordered: &[VideoFile]) -> Vec<String> {
        ordered.iter().map(|v| v.name.clone()).collect()
    }

    #[test]
    fn numeric_not_lexical() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(&root, &["10 - ten.mp4", "2 - two.mp4", "1 - one.mp4"]),
            &root,
            OrderingMode::Levels,
        );
        assert_eq!(names(&ordered), vec!["1 - one", "2 - two", "10 - ten"]);
        assert_eq!(
            ordered.iter().map(|v| v.episode).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn unnumbered_sort_last_by_name() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(&root, &["b.mp4", "A.mp4", "3.mp4"]),
            &root,
            OrderingMode::Levels,
        );
        assert_eq!(names(&ordered), vec!["3", "A", "b"]);
    }

    #[test]
    fn directory_ordinal_outranks_file_ordinal() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(
                &root,
                &["2 - Basics/1 - Types.mp4", "1 - Intro/2 - Goals.mp4", "1 - Intro/1 - Welcome.mp4"],
            ),
            &root,
            OrderingMode::Levels,
        );
        assert_eq!(names(&ordered), vec!["1 - Welcome", "2 - Goals", "1 - Types"]);
    }

    #[test]
    fn two_levels_keep_minor_chapters_contiguous() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(
                &root,
                &[
                    "2 - B/1 - x/1 - b1.mp4",
                    "1 - A/2 - y/1 - a3.mp4",
                    "1 - A/1 - x/2 - a2.mp4",
                    "1 - A/1 - x/1 - a1.mp4",
                ],
            ),
            &root,
            OrderingMode::Levels,
        );
        assert_eq!(names(&ordered), vec!["1 - a1", "2 - a2", "1 - a3", "1 - b1"]);
    }

    #[test]
    fn root_videos_come_first() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(&root, &["0 - Ch/1.mp4", "x.mp4"]),
            &root,
            OrderingMode::Levels,
        );
        assert_eq!(names(&ordered), vec!["x", "1"]);
    }

    #[test]
    fn same_ordinal_dirs_do_not_interleave() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(&root, &["Extra/1.mp4", "Bonus/2.mp4", "Extra/2.mp4", "Bonus/1.mp4"]),
            &root,
            OrderingMode::Levels,
        );
        let parents: Vec<_> = ordered
            .iter()
            .map(|v| file_name_string(v.path.parent().unwrap()))
            .collect();
        assert_eq!(parents, vec!["Bonus", "Bonus", "Extra", "Extra"]);
    }

    #[test]
    fn depth_mode_uses_dotted_tuples_and_padding() {
        let root = PathBuf::from("/course");
        let ordered = order_videos(
            videos(
                &root,
                &[
                    "2 - B/2.10 deep.mp4",
                    "2 - B/2.2 shallow.mp4",
                    "1 - A/1 - sub/1.mp4",
                    "1 - A/own.mp4",
                    "root.mp4",
                ],
            ),
            &root,
            OrderingMode::Depth(2),
        );
        assert_eq!(
            names(&ordered),
            vec!["root", "own", "1", "2.2 shallow", "2.10 deep"]
        );
    }

    #[test]
    fn independent_of_input_order() {
        let root = PathBuf::from("/course");
        let rels = ["3 - c/1.mp4", "1 - a/2.mp4", "x.mp4", "1 - a/1.mp4", "2 - b/z.mp4"];
        let forward = order_videos(videos(&root, &rels), &root, OrderingMode::Levels);
        let mut reversed_rels = rels;
        reversed_rels.reverse();
        let backward = order_videos(videos(&root, &reversed_rels), &root, OrderingMode::Levels);
        assert_eq!(forward, backward);
    }
}
