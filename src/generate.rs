//! NFO generation pass: one `tvshow.nfo` per built variant plus one NFO beside every video.

use anyhow::Result;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::engine::nfo::{
    WriteOutcome, episode_for, episode_nfo_path, render_episode, render_tvshow, tvshow_for,
    write_nfo,
};
use crate::engine::tags::collect_tags;
use crate::pipeline::error_handler::SkippedPaths;
use crate::utils::config::NfoLabels;
use crate::{Course, Opts};

/// Counts for one generation pass. Failures are per file and never stop the pass.
#[derive(Clone, Debug, Default)]
pub struct GenerateReport {
    pub written: usize,
    pub kept: usize,
    pub failed: usize,
    pub skipped: SkippedPaths,
}

impl GenerateReport {
    fn record(&mut self, path: &Path, result: Result<WriteOutcome>) {
        match result {
            Ok(WriteOutcome::Written) => self.written += 1,
            Ok(WriteOutcome::Kept) => {
                debug!("Kept existing {}", path.display());
                self.kept += 1;
            }
            Err(e) => {
                self.failed += 1;
                self.skipped.record(path, format!("{:#}", e));
            }
        }
    }

    /// Files touched in any way.
    pub fn total(&self) -> usize {
        self.written + self.kept + self.failed
    }
}

/// NFO files a pass over `courses` will produce.
pub fn planned_files(courses: &[Course]) -> usize {
    courses.iter().map(|c| c.video_count + 1).sum()
}

/// Write the NFOs of one course variant. `tags` are the course's collected tags.
///
/// Videos sharing a stem (`a.mp4`, `a.mkv`) or a root video named like `tvshow` map onto an
/// NFO path already claimed in this variant. The first claim wins; later ones count as failed
/// and are recorded in the report's skipped paths.
pub fn generate_course_nfos(
    course: &Course,
    tags: &BTreeSet<String>,
    opts: &Opts,
    report: &mut GenerateReport,
    on_file: &mut dyn FnMut(),
) {
    let tvshow_path = course.root.join(NfoLabels::TVSHOW_FILENAME);
    let tvshow = tvshow_for(course, tags, &opts.course_types);
    let result = render_tvshow(&tvshow).and_then(|xml| write_nfo(&tvshow_path, &xml, opts.overwrite));
    report.record(&tvshow_path, result);
    on_file();

    let mut claimed: HashSet<PathBuf> = HashSet::from([tvshow_path]);
    for chapter in &course.chapters {
        chapter.for_each_video_group(&mut Vec::new(), &mut |chain, videos| {
            for video in videos {
                let path = episode_nfo_path(&video.path);
                if !claimed.insert(path.clone()) {
                    report.failed += 1;
                    report.skipped.record(
                        &video.path,
                        format!("NFO path {} already used in this course", path.display()),
                    );
                    on_file();
                    continue;
                }
                let nfo = episode_for(video, chain, &course.variant);
                let result = render_episode(&nfo).and_then(|xml| write_nfo(&path, &xml, opts.overwrite));
                report.record(&path, result);
                on_file();
            }
        });
    }
}

/// Generate NFOs for every course. `on_progress(done, total)` is called after each file.
pub fn generate_nfos<F>(courses: &[Course], opts: &Opts, mut on_progress: F) -> GenerateReport
where
    F: FnMut(usize, usize),
{
    let total = planned_files(courses);
    let mut report = GenerateReport::default();
    let mut tag_cache: HashMap<PathBuf, BTreeSet<String>> = HashMap::new();
    let mut done = 0usize;

    for course in courses {
        let tags = tag_cache
            .entry(course.course_path.clone())
            .or_insert_with(|| collect_tags(&course.course_path));
        generate_course_nfos(course, tags, opts, &mut report, &mut || {
            done += 1;
            on_progress(done, total);
        });
    }
    info!(
        "NFO pass: {} written, {} kept, {} failed",
        report.written, report.kept, report.failed
    );
    report
}
