//! Point-in-time pool state snapshot

use crate::work::WorkItemRef;
use core::fmt;

/// Immutable view of the pool's execution state.
///
/// Assembled atomically under the pool's state lock, so the counts are
/// always mutually consistent: `threads_active + threads_inactive ==
/// threads_total`, and a complete pool has nothing executing. Callers
/// must re-request a snapshot to observe change.
#[derive(Clone)]
pub struct PoolSnapshot {
    /// Fixed worker count for the pool's life
    pub threads_total: usize,

    /// Workers currently executing an item
    pub threads_active: usize,

    /// Workers waiting to claim or retired
    pub threads_inactive: usize,

    /// Items in active slots at snapshot time
    pub executing: Vec<WorkItemRef>,

    /// True once the source is exhausted and every worker has retired
    pub is_complete: bool,
}

impl PoolSnapshot {
    /// Check if any worker was executing at snapshot time
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.threads_active == 0
    }
}

impl fmt::Debug for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolSnapshot")
            .field("threads_total", &self.threads_total)
            .field("threads_active", &self.threads_active)
            .field("threads_inactive", &self.threads_inactive)
            .field("executing", &self.executing.len())
            .field("is_complete", &self.is_complete)
            .finish()
    }
}
