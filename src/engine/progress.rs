//! Progress bar utilities for displaying generation status

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Arc<Mutex<Bar>> {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )))
}

/// Move the bar to `done` of `total`. Total can change between passes planned and written.
/// Uses try_lock so a contended bar skips the update instead of blocking.
pub fn set_bar_position(pb: &Arc<Mutex<Bar>>, done: usize, total: usize) {
    if let Ok(mut bar) = pb.try_lock() {
        if bar.total != total {
            bar.total = total;
        }
        let _ = bar.update_to(done);
    }
}

/// Final refresh and newline so log lines after the bar start clean.
pub fn finish_bar(pb: &Arc<Mutex<Bar>>) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.refresh();
        eprintln!();
    }
}
