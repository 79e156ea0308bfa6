//! Application configuration constants.
//! Names, defaults and NFO labels in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory settings file, e.g. `.coursenfo.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Markers ----

/// Course-root marker for the classic layout (matched case-insensitively).
pub const LESSION_MARKER: &str = "lession";
/// Course-root marker for the nested layout (matched case-insensitively).
pub const LESSION_2_MARKER: &str = "lession_2";
/// Course-root marker stem for the single layout (`single` or `single.<ext>`).
pub const SINGLE_MARKER: &str = "single";
/// A directory holding this file is skipped with its subtree while collecting videos.
pub const STOP_MARKER: &str = ".nomedia";

// ---- Defaults ----

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi"];

/// Known localized-dub directory names (one per dubbing provider / voice).
pub const DEFAULT_MANDARIN_DIR_NAMES: &[&str] = &[
    "普通话Deepl",
    "普通话DeepL",
    "普通话DeepL[男声]",
    "普通话DeepL[女声]",
    "普通话OpenAI-4o-mini",
    "普通话gemini",
];

pub const DEFAULT_ORIGINAL_DIR_NAMES: &[&str] = &["原"];

/// Directory levels below a variant directory collected by the nested layout.
pub const DEFAULT_NESTED_DEPTH: usize = 2;

/// Ordinal used for names without a leading number; sorts after every real ordinal.
pub const NO_ORDINAL: u64 = u64::MAX;

// ---- NFO output ----

/// File names and fixed texts written into NFO files.
pub struct NfoLabels;

impl NfoLabels {
    pub const TVSHOW_FILENAME: &'static str = "tvshow.nfo";
    pub const NFO_EXTENSION: &'static str = "nfo";
    /// Season written for every episode.
    pub const DEFAULT_SEASON: u32 = 1;
    /// Language label and genre for the original-language variant.
    pub const ORIGINAL: &'static str = "英语";
    /// Genre for any mandarin variant.
    pub const MANDARIN: &'static str = "普通话";
    /// Title suffix and genre for single-layout courses.
    pub const SINGLE: &'static str = "课程";
    pub const SINGLE_KIND: &'static str = "类型：Single文件课程";
    pub const PLOT_COURSE: &'static str = "课程：";
    pub const PLOT_TOTAL: &'static str = "总集数：";
    pub const PLOT_LANGUAGE: &'static str = "语言：";
    pub const PLOT_CHAPTER: &'static str = "章节：";
    /// Separator between nested chapter names in an episode plot.
    pub const CHAPTER_SEPARATOR: &'static str = " - ";
}

// ---- Tags ----

/// Extension of tag files read from the course root and its ancestors.
pub const TAG_FILE_EXTENSION: &str = "tag";
/// Tags that control visibility in the original tool and are never written as genres.
pub const HIDDEN_TAGS: &[&str] = &["显示", "隐藏"];
