//! Typed failure reporting
//!
//! Item and source failures never stop the pool; they land here instead
//! of vanishing. Workers push reports onto a lock-free queue and the
//! caller drains them with `Pool::take_failures()`. Every report is also
//! logged at warn level as it arrives.

use core::fmt;
use crossbeam_queue::SegQueue;
use drainpool_core::{kwarn, BoxError};

/// One recorded failure
#[derive(Debug)]
pub enum FailureReport {
    /// A work item's execute call returned an error
    ItemFailed { worker: usize, error: BoxError },

    /// A work item panicked; the panic was contained on the worker
    ItemPanicked { worker: usize, message: String },

    /// The work source's cursor failed to advance
    SourceFailed { error: BoxError },
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReport::ItemFailed { worker, error } => {
                write!(f, "worker {}: item failed: {}", worker, error)
            }
            FailureReport::ItemPanicked { worker, message } => {
                write!(f, "worker {}: item panicked: {}", worker, message)
            }
            FailureReport::SourceFailed { error } => {
                write!(f, "work source failed to advance: {}", error)
            }
        }
    }
}

/// Lock-free collection point for failure reports.
///
/// Multiple workers push concurrently; the caller drains from any
/// thread. Unbounded, since every item in a run may fail.
pub struct FailureLog {
    queue: SegQueue<FailureReport>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    /// Record a failure and log it
    pub fn push(&self, report: FailureReport) {
        kwarn!("pool failure: {}", report);
        self.queue.push(report);
    }

    /// Drain all reports recorded so far
    pub fn drain(&self) -> Vec<FailureReport> {
        let mut out = Vec::new();
        while let Some(report) = self.queue.pop() {
            out.push(report);
        }
        out
    }

    /// Number of undrained reports
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::new()
    }
}
