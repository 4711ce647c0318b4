//! Worker thread loop
//!
//! One loop per OS thread: claim the next item from the shared source,
//! execute it, publish the Active/Inactive transitions, repeat until
//! the source is exhausted, then retire. Claiming and executing never
//! overlap in their synchronization scope — the claim lock is released
//! before execute runs, which is what lets N items execute concurrently
//! while only one claim happens at a time.

use crate::pool::PoolShared;
use crate::report::FailureReport;
use crate::source::Claim;
use drainpool_core::{kdebug, ktrace};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub(crate) fn worker_loop(shared: Arc<PoolShared>, idx: usize) {
    kdebug!("worker {} started", idx);

    loop {
        match shared.source().claim() {
            Claim::Item(item) => {
                shared.publish_active(idx, item.clone());
                let outcome = catch_unwind(AssertUnwindSafe(|| item.execute()));
                shared.publish_inactive(idx);

                match outcome {
                    Ok(Ok(())) => ktrace!("worker {} completed an item", idx),
                    Ok(Err(error)) => {
                        shared
                            .failures()
                            .push(FailureReport::ItemFailed { worker: idx, error });
                    }
                    Err(payload) => {
                        shared.failures().push(FailureReport::ItemPanicked {
                            worker: idx,
                            message: panic_message(payload),
                        });
                    }
                }
            }
            Claim::Exhausted => break,
        }
    }

    kdebug!("worker {} retiring", idx);
    PoolShared::retire(&shared, idx);
}

/// Best-effort extraction of a panic payload's message
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
