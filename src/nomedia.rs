//! Hide original-language variants from media scanners by dropping a `.nomedia` file into them.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Opts;
use crate::engine::tools::{check_root_and_canonicalize, file_name_string, has_stop_marker};
use crate::pipeline::error_handler::SkippedPaths;
use crate::utils::config::STOP_MARKER;

#[derive(Debug, Default)]
pub struct NomediaReport {
    /// Directories that received a new `.nomedia`.
    pub created: Vec<PathBuf>,
    pub skipped: SkippedPaths,
}

fn touch_marker(dir: &Path) -> Result<()> {
    let path = dir.join(STOP_MARKER);
    File::create(&path).with_context(|| format!("create {}", path.display()))?;
    Ok(())
}

/// Create `.nomedia` in every original-language directory under `root`.
///
/// A directory that already holds `.nomedia` is left alone together with its whole subtree.
/// Running twice creates nothing the second time.
pub fn create_nomedia_files(root: &Path, opts: &Opts) -> Result<NomediaReport> {
    let root = check_root_and_canonicalize(root)?;
    let mut report = NomediaReport::default();
    let mut it = WalkDir::new(&root)
        .follow_links(opts.follow_links)
        .sort_by_file_name()
        .into_iter();

    while let Some(result) = it.next() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(PathBuf::from).unwrap_or_else(|| root.clone());
                report.skipped.record(&path, err.to_string());
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if has_stop_marker(entry.path()) {
            debug!("Already hidden: {}", entry.path().display());
            it.skip_current_dir();
            continue;
        }
        if opts.original_dir_names.contains(&file_name_string(entry.path())) {
            match touch_marker(entry.path()) {
                Ok(()) => report.created.push(entry.path().to_path_buf()),
                Err(e) => report.skipped.record(entry.path(), format!("{:#}", e)),
            }
        }
    }
    info!(
        "Created {} {} files under {}",
        report.created.len(),
        STOP_MARKER,
        root.display()
    );
    Ok(report)
}
