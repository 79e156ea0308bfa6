use std::path::{Path, PathBuf};

use crate::utils::Colors;

/// Paths a pass could not read or write, with the error text. Never fatal; reported at the end.
#[derive(Clone, Debug, Default)]
pub struct SkippedPaths {
    entries: Vec<(PathBuf, String)>,
}

impl SkippedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure and log it with enough context to diagnose.
    pub fn record(&mut self, path: &Path, msg: impl Into<String>) {
        let msg = msg.into();
        log::warn!("Skipping {}: {}", path.display(), msg);
        self.entries.push((path.to_path_buf(), msg));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PathBuf, String)> {
        self.entries.iter()
    }
}

/// Log a summary of skipped paths; in verbose mode list every one.
/// Call once after a pass has finished.
pub fn report_skipped_paths(skipped: &SkippedPaths, verbose: bool) {
    if skipped.is_empty() {
        return;
    }
    log::warn!(
        "Skipped {} paths due to permission errors or access issues",
        skipped.len()
    );
    if verbose {
        for (p, msg) in skipped.iter() {
            eprintln!(
                "  {} {} ({})",
                Colors::colorize(Colors::SKIPPED, "skipped:"),
                p.display(),
                msg
            );
        }
    }
}
