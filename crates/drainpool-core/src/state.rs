//! Worker state type

use core::fmt;

/// State of one worker slot
///
/// A worker is `Active` from the moment it claims an item until the
/// item's execute call returns, and `Inactive` otherwise. Once the
/// source is exhausted the worker goes `Inactive` permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Waiting to claim, or retired after exhaustion
    Inactive = 0,

    /// Currently executing a work item
    Active = 1,
}

impl WorkerState {
    /// Check if this worker is currently executing an item
    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, WorkerState::Active)
    }
}

impl From<u8> for WorkerState {
    fn from(v: u8) -> Self {
        match v {
            1 => WorkerState::Active,
            _ => WorkerState::Inactive,
        }
    }
}

impl From<WorkerState> for u8 {
    fn from(state: WorkerState) -> u8 {
        state as u8
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Inactive => write!(f, "INACTIVE"),
            WorkerState::Active => write!(f, "ACTIVE"),
        }
    }
}
