//! # drainpool-core
//!
//! Core types and traits for the drainpool bounded worker pool.
//!
//! This crate is policy-free: it defines what a work item and a work
//! source are, plus the shared value types the pool publishes. All
//! threading lives in the `drainpool` crate.
//!
//! ## Modules
//!
//! - `work` - Work item and work source abstractions
//! - `state` - Worker state enum
//! - `snapshot` - Point-in-time pool state view
//! - `error` - Error types
//! - `kprint` - Kernel-style debug printing macros
//! - `env` - Environment variable utilities

pub mod env;
pub mod error;
pub mod kprint;
pub mod snapshot;
pub mod state;
pub mod work;

// Re-exports for convenience
pub use env::{env_get, env_get_bool};
pub use error::{BoxError, PoolError, PoolResult};
pub use snapshot::PoolSnapshot;
pub use state::WorkerState;
pub use work::{work_fn, FallibleSource, WorkItem, WorkItemRef, WorkSource};
