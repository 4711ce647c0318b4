//! # drainpool - Bounded Work-Draining Thread Pool
//!
//! A fixed set of OS worker threads concurrently drains a single,
//! lazily-produced work source, tracks live execution state, and
//! signals completion exactly once.
//!
//! The source is a plain single-pass cursor with no thread-safety of
//! its own; the pool serializes claims behind one short-lived lock and
//! executes claimed items fully concurrently. No work-stealing, no
//! priorities, no resizing — one source, N threads, drained to the end.
//!
//! ## Quick Start
//!
//! ```ignore
//! use drainpool::{work_fn, Pool, PoolConfig};
//! use std::time::Duration;
//!
//! let items = (0..100).map(|i| work_fn(move || {
//!     println!("processing {}", i);
//!     Ok(())
//! })).collect::<Vec<_>>();
//!
//! let pool = Pool::start(
//!     PoolConfig::from_env()
//!         .items(items)
//!         .num_workers(4)
//!         .on_complete(|pool| println!("done: {:?}", pool.state(true))),
//! )?;
//!
//! pool.wait_complete(Duration::from_secs(30));
//! for failure in pool.take_failures() {
//!     eprintln!("{}", failure);
//! }
//! pool.dispose();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Caller                           │
//! │      PoolConfig → Pool::start, state(), dispose()   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                Pool Controller                      │
//! │   slot table, counters, completion guard, reports   │
//! └─────────────────────────────────────────────────────┘
//!          │                │                │
//!          ▼                ▼                ▼
//!    ┌──────────┐     ┌──────────┐     ┌──────────┐
//!    │  Worker  │     │  Worker  │     │  Worker  │
//!    │  thread  │     │  thread  │     │  thread  │
//!    └──────────┘     └──────────┘     └──────────┘
//!          │                │                │
//!          └────────────────┼────────────────┘
//!                           ▼
//!            ┌───────────────────────────┐
//!            │       SharedSource        │
//!            │  one claim at a time over │
//!            │  the single-pass cursor   │
//!            └───────────────────────────┘
//! ```

pub mod config;
pub mod pool;
pub mod report;
pub mod source;
mod worker;

// Re-export core types
pub use drainpool_core::{
    env_get, env_get_bool, work_fn, BoxError, FallibleSource, PoolError, PoolResult, PoolSnapshot,
    WorkItem, WorkItemRef, WorkSource, WorkerState,
};

// Re-export kprint macros for debug logging
pub use drainpool_core::kprint::{init as init_logging, set_log_level, LogLevel};
pub use drainpool_core::{kdebug, kerror, kinfo, ktrace, kwarn};

pub use config::PoolConfig;
pub use pool::{CompletionFn, Pool, PoolView};
pub use report::FailureReport;
pub use source::{Claim, SharedSource};
