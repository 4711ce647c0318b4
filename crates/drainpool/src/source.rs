//! Shared work source adapter
//!
//! Makes one non-thread-safe `WorkSource` safely drainable by N workers.
//! The cursor sits behind a single mutex; a claim holds the lock only
//! long enough to advance the cursor once, never during item execution.

use drainpool_core::work::{WorkItemRef, WorkSource};
use drainpool_core::BoxError;
use std::sync::Mutex;

/// Outcome of one claim attempt
pub enum Claim {
    /// The next item, never handed to any other worker
    Item(WorkItemRef),

    /// The source has nothing further; permanent once returned
    Exhausted,
}

struct CursorState {
    source: Box<dyn WorkSource>,
    exhausted: bool,
    /// Set when advancing the cursor itself failed; surfaced once by the
    /// controller, separately from item failures.
    error: Option<BoxError>,
}

/// Exclusive claim window over a single-pass work source.
///
/// Exhaustion is sticky: after the cursor first reports no further
/// element, fails, or the source is closed for teardown, every later
/// `claim()` returns `Exhausted` without touching the cursor again.
pub struct SharedSource {
    cursor: Mutex<CursorState>,
}

impl SharedSource {
    pub fn new(source: Box<dyn WorkSource>) -> Self {
        Self {
            cursor: Mutex::new(CursorState {
                source,
                exhausted: false,
                error: None,
            }),
        }
    }

    /// Claim the next item, advancing the cursor at most once.
    ///
    /// No two callers ever observe the same item; items come out in
    /// source order.
    pub fn claim(&self) -> Claim {
        let mut cur = self.lock_cursor();
        if cur.exhausted {
            return Claim::Exhausted;
        }
        match cur.source.next_item() {
            Ok(Some(item)) => Claim::Item(item),
            Ok(None) => {
                cur.exhausted = true;
                Claim::Exhausted
            }
            Err(e) => {
                cur.exhausted = true;
                cur.error = Some(e);
                Claim::Exhausted
            }
        }
    }

    /// Stop handing out items without consuming the cursor.
    ///
    /// Used by teardown: workers finish their in-flight item, see
    /// `Exhausted` on their next claim, and retire.
    pub fn close(&self) {
        self.lock_cursor().exhausted = true;
    }

    /// Check whether the source has stopped yielding items
    pub fn is_exhausted(&self) -> bool {
        self.lock_cursor().exhausted
    }

    /// Take the cursor advancement error, if one occurred
    pub fn take_error(&self) -> Option<BoxError> {
        self.lock_cursor().error.take()
    }

    fn lock_cursor(&self) -> std::sync::MutexGuard<'_, CursorState> {
        // Workers contain item panics, so the cursor lock can only be
        // poisoned by a panicking WorkSource impl. The sticky exhaustion
        // flag keeps recovered state sound.
        self.cursor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drainpool_core::work::{work_fn, FallibleSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_source(n: usize, hits: &Arc<AtomicUsize>) -> Box<dyn WorkSource> {
        let items: Vec<WorkItemRef> = (0..n)
            .map(|_| {
                let h = hits.clone();
                work_fn(move || {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect();
        Box::new(items.into_iter())
    }

    #[test]
    fn test_claims_in_order_then_exhausts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let source = SharedSource::new(counting_source(3, &hits));

        let mut claimed = 0;
        while let Claim::Item(item) = source.claim() {
            item.execute().unwrap();
            claimed += 1;
        }
        assert_eq!(claimed, 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_exhaustion_is_sticky() {
        let hits = Arc::new(AtomicUsize::new(0));
        let source = SharedSource::new(counting_source(0, &hits));

        assert!(matches!(source.claim(), Claim::Exhausted));
        assert!(matches!(source.claim(), Claim::Exhausted));
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_close_stops_claims() {
        let hits = Arc::new(AtomicUsize::new(0));
        let source = SharedSource::new(counting_source(10, &hits));

        assert!(matches!(source.claim(), Claim::Item(_)));
        source.close();
        assert!(matches!(source.claim(), Claim::Exhausted));
        assert!(source.take_error().is_none());
    }

    #[test]
    fn test_cursor_error_exhausts_and_is_surfaced() {
        let steps: Vec<Result<WorkItemRef, drainpool_core::BoxError>> = vec![
            Ok(work_fn(|| Ok(()))),
            Err("cursor failure".into()),
            Ok(work_fn(|| Ok(()))),
        ];
        let source = SharedSource::new(Box::new(FallibleSource::new(steps.into_iter())));

        assert!(matches!(source.claim(), Claim::Item(_)));
        assert!(matches!(source.claim(), Claim::Exhausted));
        // Sticky: the third (valid) step is never reached
        assert!(matches!(source.claim(), Claim::Exhausted));

        let err = source.take_error().expect("error should be surfaced");
        assert_eq!(format!("{}", err), "cursor failure");
        assert!(source.take_error().is_none());
    }

    #[test]
    fn test_concurrent_claims_never_duplicate() {
        let n = 500;
        let hits = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(SharedSource::new(counting_source(n, &hits)));

        let mut joins = Vec::new();
        for _ in 0..8 {
            let source = source.clone();
            joins.push(std::thread::spawn(move || {
                let mut claimed = 0usize;
                while let Claim::Item(item) = source.claim() {
                    item.execute().unwrap();
                    claimed += 1;
                }
                claimed
            }));
        }
        let total: usize = joins.into_iter().map(|j| j.join().unwrap()).sum();
        assert_eq!(total, n);
        assert_eq!(hits.load(Ordering::SeqCst), n);
    }
}
