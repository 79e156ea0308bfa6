//! Course tags from `*.tag` files in the course directory and every ancestor.

use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use super::tools::read_dir_sorted;
use crate::utils::config::TAG_FILE_EXTENSION;

fn is_tag_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TAG_FILE_EXTENSION))
}

/// Tags in one file: one per line, trimmed; blank lines and `#` comments ignored.
pub fn parse_tag_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

/// Union of the tags found in `course_path` and all of its ancestors.
/// Unreadable directories and files are logged and skipped.
pub fn collect_tags(course_path: &Path) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for dir in course_path.ancestors() {
        let children = match read_dir_sorted(dir, false) {
            Ok(children) => children,
            Err(e) => {
                debug!("Tags: cannot list {}: {:#}", dir.display(), e);
                continue;
            }
        };
        for child in children.iter().filter(|c| c.is_file && is_tag_file(&c.path)) {
            match fs::read_to_string(&child.path) {
                Ok(content) => tags.extend(parse_tag_lines(&content).map(str::to_string)),
                Err(e) => warn!("Cannot read tag file {}: {}", child.path.display(), e),
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lines_skip_blanks_and_comments() {
        let tags: Vec<_> = parse_tag_lines("编程\n\n# note\n  后端  \n").collect();
        assert_eq!(tags, vec!["编程", "后端"]);
    }

    #[test]
    fn tag_extension_is_case_insensitive() {
        assert!(is_tag_file(Path::new("/a/x.tag")));
        assert!(is_tag_file(Path::new("/a/x.TAG")));
        assert!(!is_tag_file(Path::new("/a/x.tags")));
    }
}
