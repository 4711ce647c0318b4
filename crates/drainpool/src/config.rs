//! Pool configuration
//!
//! Builder-pattern config with environment overrides.
//!
//! # Example
//!
//! ```ignore
//! use drainpool::{Pool, PoolConfig};
//!
//! let config = PoolConfig::from_env()
//!     .items(items)
//!     .num_workers(4)
//!     .on_complete(|pool| println!("{:?}", pool.state(true)));
//! let pool = Pool::start(config)?;
//! ```

use crate::pool::{CompletionFn, PoolView};
use core::fmt;
use drainpool_core::env::env_get;
use drainpool_core::work::{WorkItemRef, WorkSource};
use drainpool_core::{PoolError, PoolResult};

/// Default worker count: min(8, nproc/2), at least 2
fn default_num_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    (cpus / 2).clamp(2, 8)
}

/// Configuration for one pool run.
///
/// A config is consumed by `Pool::start`, so a pool is single-use by
/// construction: draining the same source twice is impossible.
pub struct PoolConfig {
    pub(crate) source: Option<Box<dyn WorkSource>>,
    pub(crate) num_workers: usize,
    pub(crate) on_complete: Option<CompletionFn>,
}

impl PoolConfig {
    /// Create config from defaults with environment overrides.
    ///
    /// Environment variables (all optional):
    /// - `POOL_NUM_WORKERS` - Number of worker threads
    pub fn from_env() -> Self {
        Self {
            source: None,
            num_workers: env_get("POOL_NUM_WORKERS", default_num_workers()),
            on_complete: None,
        }
    }

    /// Set the work source to drain
    pub fn source<S>(mut self, source: S) -> Self
    where
        S: WorkSource + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Convenience: drain a pre-built collection of items
    pub fn items<I>(self, items: I) -> Self
    where
        I: IntoIterator<Item = WorkItemRef>,
        I::IntoIter: Send + 'static,
    {
        self.source(items.into_iter())
    }

    /// Set the number of worker threads (must be >= 1)
    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Set the completion callback.
    ///
    /// Invoked exactly once, on whichever worker thread claims the
    /// terminal transition. Must not block indefinitely — it runs
    /// inside the retiring worker's teardown path.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&PoolView) + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Fail fast on invalid construction
    pub(crate) fn validate(&self) -> PoolResult<()> {
        if self.num_workers < 1 {
            return Err(PoolError::NoWorkers);
        }
        if self.source.is_none() {
            return Err(PoolError::MissingSource);
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("num_workers", &self.num_workers)
            .field("has_source", &self.source.is_some())
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drainpool_core::work::work_fn;

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = PoolConfig::from_env()
            .items(vec![work_fn(|| Ok(()))])
            .num_workers(0);
        assert!(matches!(config.validate(), Err(PoolError::NoWorkers)));
    }

    #[test]
    fn test_validate_rejects_missing_source() {
        let config = PoolConfig::from_env().num_workers(2);
        assert!(matches!(config.validate(), Err(PoolError::MissingSource)));
    }

    #[test]
    fn test_validate_accepts_minimal_config() {
        // Callback is optional; a bare source plus one worker is valid
        let config = PoolConfig::from_env()
            .items(Vec::new())
            .num_workers(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_workers_at_least_one() {
        let config = PoolConfig::from_env();
        assert!(config.num_workers >= 1);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("POOL_NUM_WORKERS", "3");
        let config = PoolConfig::from_env();
        assert_eq!(config.num_workers, 3);
        std::env::remove_var("POOL_NUM_WORKERS");
    }
}
