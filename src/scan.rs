//! Library scan: discover courses, then classify, order and chapter each language variant.

use anyhow::{Result, bail};
use log::{debug, info};
use std::path::Path;

use crate::engine::chapters::{build_chapters, count_videos};
use crate::engine::classify::{classify, classify_collected};
use crate::engine::ordering::{OrderingMode, order_videos};
use crate::engine::tools::{check_root_and_canonicalize, file_name_string};
use crate::pipeline::collect::{CollectScope, collect_videos};
use crate::pipeline::discovery::{CourseMarker, discover_courses};
use crate::pipeline::error_handler::SkippedPaths;
use crate::{Course, DiscoveredCourse, LanguageVariant, Layout, Opts, ScanStats};

/// Everything one scan produced.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub discovered: Vec<DiscoveredCourse>,
    /// One entry per built variant, in discovery order (mandarin variants before the original).
    pub courses: Vec<Course>,
    pub stats: ScanStats,
    pub skipped: SkippedPaths,
}

fn validate_opts(opts: &Opts) -> Result<()> {
    if opts.video_extensions.is_empty() {
        bail!("no video extensions configured");
    }
    if opts.layout == Layout::Nested && opts.depth == 0 {
        bail!("nested layout needs a depth of at least 1");
    }
    Ok(())
}

/// Build one variant of a course rooted at `variant_root`. `None` when no structure or no videos.
pub fn build_variant(
    course: &DiscoveredCourse,
    variant_root: &Path,
    variant: LanguageVariant,
    opts: &Opts,
    skipped: &mut SkippedPaths,
) -> Option<Course> {
    let (structure, ordered) = match opts.layout {
        Layout::Classic | Layout::Single => {
            let structure = classify(variant_root, opts);
            let scope = CollectScope::for_structure(structure)?;
            let videos = collect_videos(variant_root, opts, scope, skipped);
            (structure, order_videos(videos, variant_root, OrderingMode::Levels))
        }
        Layout::Nested => {
            let videos = collect_videos(variant_root, opts, CollectScope::up_to(opts.depth), skipped);
            let structure = classify_collected(variant_root, &videos);
            (
                structure,
                order_videos(videos, variant_root, OrderingMode::Depth(opts.depth)),
            )
        }
    };
    if ordered.is_empty() {
        info!("No videos in {}", variant_root.display());
        return None;
    }
    let chapters = build_chapters(variant_root, structure, ordered);
    let video_count = count_videos(&chapters);
    debug!(
        "{} [{}]: {} ({} chapters, {} videos)",
        course.name,
        file_name_string(variant_root),
        structure,
        chapters.len(),
        video_count
    );
    Some(Course {
        course_path: course.path.clone(),
        root: variant_root.to_path_buf(),
        name: course.name.clone(),
        variant,
        structure,
        chapters,
        video_count,
    })
}

/// Every buildable variant of a discovered course: each mandarin directory, then the original.
/// In the single layout the course root itself is the only variant.
pub fn build_course(course: &DiscoveredCourse, opts: &Opts, skipped: &mut SkippedPaths) -> Vec<Course> {
    if opts.layout == Layout::Single {
        return build_variant(course, &course.path, LanguageVariant::Single, opts, skipped)
            .into_iter()
            .collect();
    }
    let mut built = Vec::new();
    for dir in &course.mandarin_paths {
        let variant = LanguageVariant::Mandarin(file_name_string(dir));
        built.extend(build_variant(course, dir, variant, opts, skipped));
    }
    if let Some(original) = &course.original_path {
        built.extend(build_variant(course, original, LanguageVariant::Original, opts, skipped));
    }
    if built.is_empty() {
        info!("Course {} has no buildable language variant", course.name);
    }
    built
}

/// Scan the library at `root`. Read-only: nothing is written to disk.
///
/// Fails only when `root` is not an existing directory or the options are unusable.
/// Per-directory problems end up in [`ScanResult::skipped`].
pub fn scan_dir(root: &Path, opts: &Opts) -> Result<ScanResult> {
    validate_opts(opts)?;
    let root = check_root_and_canonicalize(root)?;
    let mut skipped = SkippedPaths::new();

    let marker = CourseMarker::for_layout(opts.layout);
    let discovered = discover_courses(&root, &marker, opts, &mut skipped);
    let courses: Vec<Course> = discovered
        .iter()
        .flat_map(|c| build_course(c, opts, &mut skipped))
        .collect();
    let stats = ScanStats::from_courses(&discovered, &courses);
    info!(
        "Scanned {}: {} courses, {} variants built, {} videos",
        root.display(),
        stats.total_courses,
        courses.len(),
        stats.total_videos
    );
    Ok(ScanResult {
        discovered,
        courses,
        stats,
        skipped,
    })
}
