//! Course discovery: find marker-bearing course roots and resolve their language variants.

use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error_handler::SkippedPaths;
use crate::engine::tools::{DirChild, file_name_string, read_dir_sorted};
use crate::utils::config::{LESSION_2_MARKER, LESSION_MARKER, SINGLE_MARKER};
use crate::{DiscoveredCourse, Layout, Opts};

/// Predicate that makes a directory a course root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseMarker {
    /// A file whose name case-insensitively equals this name.
    Named(String),
    /// `single` or `single.<anything>`.
    Single,
}

impl CourseMarker {
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::Classic => CourseMarker::Named(LESSION_MARKER.to_string()),
            Layout::Nested => CourseMarker::Named(LESSION_2_MARKER.to_string()),
            Layout::Single => CourseMarker::Single,
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            CourseMarker::Named(marker) => file_name.to_lowercase() == marker.to_lowercase(),
            CourseMarker::Single => {
                file_name == SINGLE_MARKER
                    || file_name
                        .strip_prefix(SINGLE_MARKER)
                        .is_some_and(|rest| rest.starts_with('.'))
            }
        }
    }

    /// Only the named markers carry language-variant subdirectories.
    fn has_variants(&self) -> bool {
        matches!(self, CourseMarker::Named(_))
    }
}

fn marker_files(children: &[DirChild], marker: &CourseMarker) -> Vec<PathBuf> {
    children
        .iter()
        .filter(|c| c.is_file && marker.matches(&c.name))
        .map(|c| c.path.clone())
        .collect()
}

/// Mandarin variant directories (all matches, name-sorted) and the first original variant directory.
pub fn resolve_language_dirs(children: &[DirChild], opts: &Opts) -> (Vec<PathBuf>, Option<PathBuf>) {
    let mut mandarin = Vec::new();
    let mut original = None;
    for child in children.iter().filter(|c| c.is_dir) {
        if opts.mandarin_dir_names.contains(&child.name) {
            mandarin.push(child.path.clone());
        }
        if original.is_none() && opts.original_dir_names.contains(&child.name) {
            original = Some(child.path.clone());
        }
    }
    // children are already name-sorted; keep the guarantee explicit for callers passing raw lists
    mandarin.sort_by_key(|p| file_name_string(p));
    (mandarin, original)
}

fn course_from_dir(
    path: &Path,
    children: &[DirChild],
    marker: &CourseMarker,
    opts: &Opts,
) -> Option<DiscoveredCourse> {
    let markers = marker_files(children, marker);
    if markers.is_empty() {
        return None;
    }
    let (mandarin_paths, original_path) = if marker.has_variants() {
        resolve_language_dirs(children, opts)
    } else {
        (Vec::new(), None)
    };
    Some(DiscoveredCourse {
        path: path.to_path_buf(),
        name: file_name_string(path),
        marker_files: markers,
        mandarin_paths,
        original_path,
    })
}

/// Depth-first search under `root` for course roots.
///
/// Once a directory qualifies, nothing below it is searched (courses never overlap).
/// Directories that cannot be read are recorded in `skipped` and contribute no courses;
/// traversal continues with their siblings. Results come out in name-sorted walk order.
pub fn discover_courses(
    root: &Path,
    marker: &CourseMarker,
    opts: &Opts,
    skipped: &mut SkippedPaths,
) -> Vec<DiscoveredCourse> {
    let mut courses = Vec::new();
    let mut it = WalkDir::new(root)
        .follow_links(opts.follow_links)
        .sort_by_file_name()
        .into_iter();

    while let Some(result) = it.next() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(PathBuf::from).unwrap_or_else(|| root.to_path_buf());
                skipped.record(&path, err.to_string());
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let children = match read_dir_sorted(entry.path(), opts.follow_links) {
            Ok(children) => children,
            Err(e) => {
                skipped.record(entry.path(), format!("{:#}", e));
                it.skip_current_dir();
                continue;
            }
        };
        if let Some(course) = course_from_dir(entry.path(), &children, marker, opts) {
            debug!(
                "Course root {} (mandarin: {}, original: {})",
                course.path.display(),
                course.mandarin_paths.len(),
                course.has_original()
            );
            courses.push(course);
            it.skip_current_dir();
        }
    }
    info!("Found {} courses under {}", courses.len(), root.display());
    courses
}
