//! Work item and work source abstractions
//!
//! A `WorkItem` is the unit of execution: no arguments, no return value,
//! may fail. A `WorkSource` is the lazy, ordered, single-pass supply of
//! items. The source is NOT safe for concurrent advancement — the pool
//! serializes access behind its shared-source adapter.

use crate::error::BoxError;
use std::sync::Arc;

/// A unit of work executed by one worker thread.
///
/// The pool never mutates an item and drops its reference once the
/// execute call returns. Items shared with snapshots are reference
/// counted, so identity is pointer identity (`Arc::ptr_eq`).
pub trait WorkItem: Send + Sync {
    /// Run the work. May block; runs on a worker thread.
    fn execute(&self) -> Result<(), BoxError>;
}

/// Shared handle to a work item
pub type WorkItemRef = Arc<dyn WorkItem>;

/// Lazy, ordered, single-pass supply of work items.
///
/// **Contract:**
/// - `next_item()` advances the cursor by exactly one.
/// - `Ok(None)` means exhausted; callers must not advance again.
/// - `Err(_)` means the cursor itself failed; the pool treats this as
///   exhaustion and surfaces the error separately from item failures.
/// - Not safe for concurrent advancement. The pool owns the source for
///   its whole lifetime and never shares the raw cursor with workers.
pub trait WorkSource: Send {
    /// Advance the cursor once and return the next item, if any.
    fn next_item(&mut self) -> Result<Option<WorkItemRef>, BoxError>;
}

/// Any sendable iterator over item refs is an infallible work source.
impl<I> WorkSource for I
where
    I: Iterator<Item = WorkItemRef> + Send,
{
    fn next_item(&mut self) -> Result<Option<WorkItemRef>, BoxError> {
        Ok(self.next())
    }
}

/// Work source over an iterator of fallible steps.
///
/// Lets tests and callers model a cursor whose advancement can fail,
/// e.g. a paged database scan.
pub struct FallibleSource<I> {
    iter: I,
}

impl<I> FallibleSource<I>
where
    I: Iterator<Item = Result<WorkItemRef, BoxError>> + Send,
{
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I> WorkSource for FallibleSource<I>
where
    I: Iterator<Item = Result<WorkItemRef, BoxError>> + Send,
{
    fn next_item(&mut self) -> Result<Option<WorkItemRef>, BoxError> {
        self.iter.next().transpose()
    }
}

struct FnWorkItem<F> {
    f: F,
}

impl<F> WorkItem for FnWorkItem<F>
where
    F: Fn() -> Result<(), BoxError> + Send + Sync,
{
    fn execute(&self) -> Result<(), BoxError> {
        (self.f)()
    }
}

/// Wrap a closure as a work item.
///
/// # Example
///
/// ```ignore
/// use drainpool_core::work::work_fn;
///
/// let item = work_fn(|| {
///     println!("hello from a worker");
///     Ok(())
/// });
/// ```
pub fn work_fn<F>(f: F) -> WorkItemRef
where
    F: Fn() -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(FnWorkItem { f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Needed so `Result<Option<WorkItemRef>, _>::unwrap_err` compiles.
    impl std::fmt::Debug for dyn WorkItem {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("WorkItem")
        }
    }

    #[test]
    fn test_work_fn_executes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let item = work_fn(move || {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert!(item.execute().is_ok());
        assert!(item.execute().is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_iterator_is_source() {
        let items: Vec<WorkItemRef> = vec![work_fn(|| Ok(())), work_fn(|| Ok(()))];
        let mut source = items.into_iter();
        assert!(WorkSource::next_item(&mut source).unwrap().is_some());
        assert!(WorkSource::next_item(&mut source).unwrap().is_some());
        assert!(WorkSource::next_item(&mut source).unwrap().is_none());
    }

    #[test]
    fn test_fallible_source_surfaces_error() {
        let steps: Vec<Result<WorkItemRef, BoxError>> = vec![
            Ok(work_fn(|| Ok(()))),
            Err("cursor broke".into()),
        ];
        let mut source = FallibleSource::new(steps.into_iter());
        assert!(source.next_item().unwrap().is_some());
        let err = source.next_item().unwrap_err();
        assert_eq!(format!("{}", err), "cursor broke");
    }

    #[test]
    fn test_item_identity_is_pointer_identity() {
        let a = work_fn(|| Ok(()));
        let b = a.clone();
        let c = work_fn(|| Ok(()));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
