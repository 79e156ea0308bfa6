//! Background pass runner: at most one pass (scan or NFO generation) runs at a time.
//! Progress is reported over a channel; a request made while a pass is running is rejected.

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Events a running pass sends to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassEvent {
    Progress { done: usize, total: usize },
    Finished,
}

/// Handed to the pass body for reporting progress.
#[derive(Clone)]
pub struct ProgressSender {
    tx: Sender<PassEvent>,
}

impl ProgressSender {
    pub fn progress(&self, done: usize, total: usize) {
        // Receiver gone means nobody is watching; the pass still completes.
        let _ = self.tx.send(PassEvent::Progress { done, total });
    }
}

/// A started pass: its event stream and the join handle for its result.
pub struct PassHandle<T> {
    pub events: Receiver<PassEvent>,
    handle: JoinHandle<T>,
}

impl<T> PassHandle<T> {
    /// Wait for the pass to end and take its result.
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| anyhow!("pass thread panicked"))
    }
}

/// Clears the busy flag when the pass body returns or unwinds.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight runner for long passes.
#[derive(Clone, Default)]
pub struct PassRunner {
    busy: Arc<AtomicBool>,
}

impl PassRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start `body` on its own thread. Returns `None` (and starts nothing) while another pass runs.
    pub fn try_start<T, F>(&self, name: &'static str, body: F) -> Option<PassHandle<T>>
    where
        T: Send + 'static,
        F: FnOnce(&ProgressSender) -> T + Send + 'static,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("A pass is already running; {} request ignored", name);
            return None;
        }
        let (tx, events) = unbounded();
        let guard = BusyGuard(Arc::clone(&self.busy));
        let handle = thread::spawn(move || {
            let _guard = guard;
            debug!("{} pass started", name);
            let sender = ProgressSender { tx };
            let out = body(&sender);
            let _ = sender.tx.send(PassEvent::Finished);
            debug!("{} pass finished", name);
            out
        });
        Some(PassHandle { events, handle })
    }
}
