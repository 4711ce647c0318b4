//! Pool controller
//!
//! Owns the shared source, the fixed worker set, and the aggregate
//! state. Detects global completion exactly once and provides
//! idempotent teardown.
//!
//! Aggregate state lives behind a single mutex; workers publish their
//! Active/Inactive transitions through it and snapshots are assembled
//! under the same lock, so counts are never observed mid-update. The
//! claim lock inside `SharedSource` is separate and the two are never
//! held together.

use crate::config::PoolConfig;
use crate::report::{FailureLog, FailureReport};
use crate::source::SharedSource;
use crate::worker::worker_loop;
use drainpool_core::work::WorkItemRef;
use drainpool_core::{kdebug, kinfo, PoolError, PoolResult, PoolSnapshot, WorkerState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Completion callback type.
///
/// Runs on whichever worker thread claims the terminal transition, not
/// on a caller or dedicated thread. Must not block indefinitely.
pub type CompletionFn = Box<dyn FnOnce(&PoolView) + Send + 'static>;

struct SlotState {
    state: WorkerState,
    executing: Option<WorkItemRef>,
}

struct PoolState {
    slots: Vec<SlotState>,
    active: usize,
    retired: usize,
    /// Snapshot cache; cleared by every worker transition
    cached: Option<PoolSnapshot>,
}

/// State shared between the pool handle and its workers
pub(crate) struct PoolShared {
    source: SharedSource,
    state: Mutex<PoolState>,
    total: usize,
    complete: AtomicBool,
    /// Exactly-once guard for the terminal transition. Concurrent
    /// retirements race through a compare-and-swap, so only one worker
    /// ever runs the completion path.
    completion_claimed: AtomicBool,
    on_complete: Mutex<Option<CompletionFn>>,
    failures: FailureLog,
}

impl PoolShared {
    pub(crate) fn source(&self) -> &SharedSource {
        &self.source
    }

    pub(crate) fn failures(&self) -> &FailureLog {
        &self.failures
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    /// Worker `idx` claimed an item and is about to execute it
    pub(crate) fn publish_active(&self, idx: usize, item: WorkItemRef) {
        let mut st = self.lock_state();
        st.slots[idx].state = WorkerState::Active;
        st.slots[idx].executing = Some(item);
        st.active += 1;
        st.cached = None;
    }

    /// Worker `idx` finished executing (success or failure)
    pub(crate) fn publish_inactive(&self, idx: usize) {
        let mut st = self.lock_state();
        st.slots[idx].state = WorkerState::Inactive;
        st.slots[idx].executing = None;
        st.active -= 1;
        st.cached = None;
    }

    /// Worker `idx` saw exhaustion and its thread is about to exit.
    ///
    /// The last worker to retire runs completion detection.
    pub(crate) fn retire(shared: &Arc<Self>, idx: usize) {
        let last = {
            let mut st = shared.lock_state();
            debug_assert!(!st.slots[idx].state.is_active());
            st.retired += 1;
            st.cached = None;
            st.retired == shared.total
        };
        if last {
            Self::finish(shared);
        }
    }

    /// Terminal transition: source exhausted and every worker retired.
    fn finish(shared: &Arc<Self>) {
        if shared
            .completion_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        if let Some(error) = shared.source.take_error() {
            shared.failures.push(FailureReport::SourceFailed { error });
        }

        shared.complete.store(true, Ordering::Release);
        kinfo!("pool complete: all {} workers retired", shared.total);

        let callback = {
            let mut guard = shared
                .on_complete
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.take()
        };
        if let Some(callback) = callback {
            let view = PoolView {
                shared: shared.clone(),
            };
            callback(&view);
        }
    }

    /// Assemble a consistent snapshot under the state lock.
    ///
    /// `force_refresh = false` may serve a cached snapshot; `true`
    /// bypasses and replaces the cache. A cached snapshot is never
    /// served once its completion bit has gone stale, so polling with
    /// either flag eventually observes `is_complete == true`.
    fn snapshot(&self, force_refresh: bool) -> PoolSnapshot {
        let complete = self.is_complete();
        let mut st = self.lock_state();

        if !force_refresh {
            if let Some(cached) = &st.cached {
                if cached.is_complete == complete {
                    return cached.clone();
                }
            }
        }

        let executing: Vec<WorkItemRef> = st
            .slots
            .iter()
            .filter_map(|slot| slot.executing.clone())
            .collect();
        let snap = PoolSnapshot {
            threads_total: self.total,
            threads_active: st.active,
            threads_inactive: self.total - st.active,
            executing,
            is_complete: complete,
        };
        st.cached = Some(snap.clone());
        snap
    }

    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        // Item panics are contained in the worker loop before any state
        // lock is taken, so poisoning here means a bug in the pool
        // itself; recover with the counters as-is.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read-only handle passed to the completion callback
pub struct PoolView {
    pub(crate) shared: Arc<PoolShared>,
}

impl PoolView {
    /// Point-in-time state snapshot; see [`Pool::state`]
    pub fn state(&self, force_refresh: bool) -> PoolSnapshot {
        self.shared.snapshot(force_refresh)
    }

    pub fn is_complete(&self) -> bool {
        self.shared.is_complete()
    }
}

/// Handle to one running pool.
///
/// Created by `Pool::start`, which consumes its config — a pool drains
/// exactly one source and cannot be restarted. Dropping the handle
/// disposes the pool, so worker threads are released on every exit
/// path.
pub struct Pool {
    shared: Arc<PoolShared>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    disposed: AtomicBool,
}

impl Pool {
    /// Validate the config and spawn the workers immediately.
    ///
    /// Fails with `PoolError::NoWorkers` or `PoolError::MissingSource`
    /// before any thread is spawned.
    pub fn start(config: PoolConfig) -> PoolResult<Pool> {
        config.validate()?;
        let PoolConfig {
            source,
            num_workers,
            on_complete,
        } = config;
        let source = source.ok_or(PoolError::MissingSource)?;

        let slots = (0..num_workers)
            .map(|_| SlotState {
                state: WorkerState::Inactive,
                executing: None,
            })
            .collect();
        let shared = Arc::new(PoolShared {
            source: SharedSource::new(source),
            state: Mutex::new(PoolState {
                slots,
                active: 0,
                retired: 0,
                cached: None,
            }),
            total: num_workers,
            complete: AtomicBool::new(false),
            completion_claimed: AtomicBool::new(false),
            on_complete: Mutex::new(on_complete),
            failures: FailureLog::new(),
        });

        let mut handles = Vec::with_capacity(num_workers);
        for idx in 0..num_workers {
            let worker_shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("drainpool-worker-{}", idx))
                .spawn(move || worker_loop(worker_shared, idx));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Partial start: stop handing out items and drain
                    // the workers that did spawn before reporting.
                    shared.source.close();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(PoolError::SpawnFailed(e));
                }
            }
        }

        kinfo!("pool started with {} workers", num_workers);
        Ok(Pool {
            shared,
            handles: Mutex::new(handles),
            disposed: AtomicBool::new(false),
        })
    }

    /// Point-in-time state snapshot.
    ///
    /// Always internally consistent: `threads_active + threads_inactive
    /// == threads_total` and `executing` holds exactly the items in
    /// active slots. `force_refresh = true` bypasses the internal
    /// snapshot cache; with `false` a cached snapshot may be served,
    /// but never one whose completion bit is stale.
    pub fn state(&self, force_refresh: bool) -> PoolSnapshot {
        self.shared.snapshot(force_refresh)
    }

    /// Check whether the pool has reached terminal completion
    pub fn is_complete(&self) -> bool {
        self.shared.is_complete()
    }

    /// Drain all failure reports recorded so far
    pub fn take_failures(&self) -> Vec<FailureReport> {
        self.shared.failures.drain()
    }

    /// Poll until completion or timeout; returns whether completion
    /// was observed.
    pub fn wait_complete(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.shared.is_complete() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// Tear the pool down and join all worker threads.
    ///
    /// Idempotent. Stops further claims, then waits for each worker to
    /// finish its in-flight item and retire; never interrupts an item
    /// mid-execution. Safe to call after natural completion, where it
    /// only reaps the already-retired threads.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shared.source.close();
        let handles = {
            let mut guard = self
                .handles
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *guard)
        };
        for handle in handles {
            let _ = handle.join();
        }
        kdebug!("pool disposed");
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.dispose();
    }
}
