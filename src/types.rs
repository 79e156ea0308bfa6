//! Public and internal types for the coursenfo API and pipeline.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::utils::config::{
    DEFAULT_MANDARIN_DIR_NAMES, DEFAULT_NESTED_DEPTH, DEFAULT_ORIGINAL_DIR_NAMES,
    DEFAULT_VIDEO_EXTENSIONS,
};

/// One video file inside a course variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFile {
    /// Absolute path to the video.
    pub path: PathBuf,
    /// File stem, used as the episode title.
    pub name: String,
    /// 1-based global episode number. Zero until the ordering step assigns it.
    pub episode: usize,
}

impl VideoFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            episode: 0,
        }
    }
}

/// A named grouping of videos. Name is empty for the unnamed root-level chapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chapter {
    pub name: String,
    pub videos: Vec<VideoFile>,
    pub sub_chapters: Vec<Chapter>,
}

impl Chapter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Videos owned by this chapter and every nested sub-chapter.
    pub fn video_count(&self) -> usize {
        self.videos.len()
            + self
                .sub_chapters
                .iter()
                .map(Chapter::video_count)
                .sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_chapters.is_empty()
    }

    /// Depth-first walk yielding `(chapter path, videos)` for every chapter that owns videos.
    /// The chapter path is the list of names from the top-level chapter down.
    pub fn for_each_video_group<'a, F>(&'a self, parents: &mut Vec<&'a str>, f: &mut F)
    where
        F: FnMut(&[&'a str], &'a [VideoFile]),
    {
        parents.push(&self.name);
        if !self.videos.is_empty() {
            f(parents, &self.videos);
        }
        for sub in &self.sub_chapters {
            sub.for_each_video_group(parents, f);
        }
        parents.pop();
    }
}

/// Where the videos of a directory physically live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StructureClass {
    /// No valid structure detected; nothing is built for the directory.
    #[default]
    Unknown = 0,
    /// Videos directly in the root.
    Flat = 1,
    /// Videos one level down, one chapter per subdirectory.
    NestedOne = 2,
    /// Videos two levels down: major chapter, minor chapter, videos.
    NestedTwo = 3,
    /// Videos in the root and one level down.
    Mixed = 4,
}

impl StructureClass {
    pub fn is_known(self) -> bool {
        self != StructureClass::Unknown
    }

    /// Directory levels (0 = root) whose videos belong to a tree of this class.
    pub fn video_levels(self) -> Option<(usize, usize)> {
        match self {
            StructureClass::Unknown => None,
            StructureClass::Flat => Some((0, 0)),
            StructureClass::NestedOne => Some((1, 1)),
            StructureClass::NestedTwo => Some((2, 2)),
            StructureClass::Mixed => Some((0, 1)),
        }
    }
}

impl fmt::Display for StructureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StructureClass::Unknown => "unknown",
            StructureClass::Flat => "flat",
            StructureClass::NestedOne => "nested-one",
            StructureClass::NestedTwo => "nested-two",
            StructureClass::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

/// How a course root is recognised and how its variants are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `lession` marker; variants are classified and ordered by fixed levels.
    #[default]
    Classic,
    /// `lession_2` marker; variants are ordered by a bounded directory depth.
    Nested,
    /// `single` / `single.*` marker; the course root is the only variant.
    Single,
}

/// Which language variant a built course belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageVariant {
    /// Localized dub; carries the directory name (one of several providers).
    Mandarin(String),
    Original,
    /// A `single` layout course has no language directories.
    Single,
}

/// A course root found by discovery, with its resolved language-variant directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredCourse {
    pub path: PathBuf,
    pub name: String,
    /// Marker files that made this directory a course root.
    pub marker_files: Vec<PathBuf>,
    /// Mandarin variant directories, sorted by name.
    pub mandarin_paths: Vec<PathBuf>,
    pub original_path: Option<PathBuf>,
}

impl DiscoveredCourse {
    pub fn has_mandarin(&self) -> bool {
        !self.mandarin_paths.is_empty()
    }

    pub fn has_original(&self) -> bool {
        self.original_path.is_some()
    }
}

/// One built course variant: the ordered videos arranged into chapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    /// Course root (the directory holding the marker file).
    pub course_path: PathBuf,
    /// Variant directory the videos were collected from.
    pub root: PathBuf,
    pub name: String,
    pub variant: LanguageVariant,
    pub structure: StructureClass,
    pub chapters: Vec<Chapter>,
    pub video_count: usize,
}

/// Full options for scanning and generating. Built from defaults, `.coursenfo.toml` and the CLI.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Lowercase extensions including the dot (e.g. `.mp4`).
    pub video_extensions: Vec<String>,
    /// Skip any directory holding a `.nomedia` file while collecting videos.
    pub check_stop_marker: bool,
    pub follow_links: bool,
    /// Rewrite NFO files that already exist.
    pub overwrite: bool,
    pub mandarin_dir_names: BTreeSet<String>,
    pub original_dir_names: BTreeSet<String>,
    pub layout: Layout,
    /// Directory depth for the nested layout (levels below the variant directory).
    pub depth: usize,
    /// Values written as `<coursetype>` into every `tvshow.nfo`.
    pub course_types: BTreeSet<String>,
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            check_stop_marker: true,
            follow_links: false,
            overwrite: false,
            mandarin_dir_names: DEFAULT_MANDARIN_DIR_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            original_dir_names: DEFAULT_ORIGINAL_DIR_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            layout: Layout::default(),
            depth: DEFAULT_NESTED_DEPTH,
            course_types: BTreeSet::new(),
            verbose: false,
        }
    }
}

impl Opts {
    /// True when `name` is any known language-variant directory name.
    pub fn is_language_dir(&self, name: &str) -> bool {
        self.mandarin_dir_names.contains(name) || self.original_dir_names.contains(name)
    }

    /// Merge user-supplied comma-separated mandarin directory names into the set.
    pub fn add_mandarin_dir_names(&mut self, csv: &str) {
        self.mandarin_dir_names.extend(split_csv(csv));
    }

    pub fn add_original_dir_names(&mut self, csv: &str) {
        self.original_dir_names.extend(split_csv(csv));
    }

    /// Replace the extension list from `mp4,.MKV` style input; dots are added and case folded.
    pub fn set_video_extensions(&mut self, csv: &str) {
        self.video_extensions = split_csv(csv)
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
    }
}

fn split_csv(csv: &str) -> impl Iterator<Item = String> + '_ {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Aggregate counts over a discovery pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub total_courses: usize,
    pub with_mandarin: usize,
    pub with_original: usize,
    pub both_languages: usize,
    pub mandarin_only: usize,
    pub original_only: usize,
    pub total_videos: usize,
}

impl ScanStats {
    pub fn from_courses(discovered: &[DiscoveredCourse], built: &[Course]) -> Self {
        let with_mandarin = discovered.iter().filter(|c| c.has_mandarin()).count();
        let with_original = discovered.iter().filter(|c| c.has_original()).count();
        let both_languages = discovered
            .iter()
            .filter(|c| c.has_mandarin() && c.has_original())
            .count();
        ScanStats {
            total_courses: discovered.len(),
            with_mandarin,
            with_original,
            both_languages,
            mandarin_only: with_mandarin - both_languages,
            original_only: with_original - both_languages,
            total_videos: built.iter().map(|c| c.video_count).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_video_extensions_normalizes() {
        let mut opts = Opts::default();
        opts.set_video_extensions(" MP4, .mkv,,webm ");
        assert_eq!(opts.video_extensions, vec![".mp4", ".mkv", ".webm"]);
    }

    #[test]
    fn custom_mandarin_names_extend_defaults() {
        let mut opts = Opts::default();
        let before = opts.mandarin_dir_names.len();
        opts.add_mandarin_dir_names("普通话Azure, 普通话gemini");
        assert_eq!(opts.mandarin_dir_names.len(), before + 1);
        assert!(opts.is_language_dir("普通话Azure"));
        assert!(opts.is_language_dir("原"));
        assert!(!opts.is_language_dir("01 - Intro"));
    }

    #[test]
    fn chapter_video_count_is_recursive() {
        let mut major = Chapter::named("1 - Major");
        let mut minor = Chapter::named("1 - Minor");
        minor.videos.push(VideoFile::new(PathBuf::from("/a/1.mp4")));
        minor.videos.push(VideoFile::new(PathBuf::from("/a/2.mp4")));
        major.sub_chapters.push(minor);
        assert_eq!(major.video_count(), 2);
        assert!(!major.is_leaf());
    }
}
