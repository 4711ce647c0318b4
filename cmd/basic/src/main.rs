//! Basic drainpool example
//!
//! Drains a small batch of items across a few workers while polling
//! state snapshots.
//!
//! # Environment Variables
//!
//! - `POOL_LOG_LEVEL=debug` - Set log level (off, error, warn, info, debug, trace)
//! - `POOL_FLUSH_LOG=1` - Flush debug output immediately
//! - `POOL_NUM_WORKERS=4` - Worker count

use drainpool::{kinfo, work_fn, Pool, PoolConfig, WorkItemRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// POOL_LOG_LEVEL=debug cargo run -p drainpool-basic
fn main() {
    println!("=== drainpool Basic Example ===\n");

    let executed = Arc::new(AtomicUsize::new(0));

    let items: Vec<WorkItemRef> = (0..16)
        .map(|i| {
            let executed = executed.clone();
            work_fn(move || {
                // Pretend each item takes a little while
                std::thread::sleep(Duration::from_millis(25));
                executed.fetch_add(1, Ordering::SeqCst);
                kinfo!("item {} done", i);
                Ok(())
            })
        })
        .collect();

    let config = PoolConfig::from_env()
        .items(items)
        .num_workers(4)
        .on_complete(|pool| {
            kinfo!("completion callback: {:?}", pool.state(true));
        });
    println!("Starting pool: {:?}", config);

    let pool = match Pool::start(config) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to start pool: {}", e);
            std::process::exit(1);
        }
    };

    // Poll snapshots while the pool drains
    while !pool.is_complete() {
        let snap = pool.state(true);
        println!(
            "active={} inactive={} executing={} complete={}",
            snap.threads_active,
            snap.threads_inactive,
            snap.executing.len(),
            snap.is_complete
        );
        std::thread::sleep(Duration::from_millis(20));
    }

    let snap = pool.state(true);
    println!(
        "\nFinal: {} items executed, active={} inactive={} complete={}",
        executed.load(Ordering::SeqCst),
        snap.threads_active,
        snap.threads_inactive,
        snap.is_complete
    );

    for failure in pool.take_failures() {
        eprintln!("failure: {}", failure);
    }

    pool.dispose();
    println!("\n=== Example Complete ===");
}
