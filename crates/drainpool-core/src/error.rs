//! Error types for the pool

use core::fmt;

/// Boxed error returned by work items and work sources.
///
/// Items are free to fail with whatever error type suits them; the pool
/// only needs `Display` for reporting and `Send` to move the error off
/// the worker thread.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors that can occur when constructing or driving a pool
#[derive(Debug)]
pub enum PoolError {
    /// Configuration asked for zero worker threads
    NoWorkers,

    /// Configuration carried no work source
    MissingSource,

    /// Failed to spawn a worker thread
    SpawnFailed(std::io::Error),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::NoWorkers => write!(f, "pool requires at least one worker thread"),
            PoolError::MissingSource => write!(f, "pool requires a work source"),
            PoolError::SpawnFailed(e) => write!(f, "failed to spawn worker thread: {}", e),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::SpawnFailed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = PoolError::NoWorkers;
        assert_eq!(format!("{}", e), "pool requires at least one worker thread");

        let e = PoolError::MissingSource;
        assert_eq!(format!("{}", e), "pool requires a work source");
    }

    #[test]
    fn test_spawn_failed_source() {
        use std::error::Error;
        let e = PoolError::SpawnFailed(std::io::Error::new(
            std::io::ErrorKind::Other,
            "out of threads",
        ));
        assert!(e.source().is_some());
        assert!(format!("{}", e).contains("out of threads"));
    }
}
