//! Stress test - many items, many workers
//!
//! Verifies exactly-once execution under load and reports drain
//! throughput.

use drainpool::{work_fn, Pool, PoolConfig, WorkItemRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() {
    println!("=== drainpool Stress Test ===\n");

    let num_items: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);
    let num_workers: usize = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12);

    println!("Draining {} items across {} workers...", num_items, num_workers);

    let counters: Vec<Arc<AtomicUsize>> = (0..num_items)
        .map(|_| Arc::new(AtomicUsize::new(0)))
        .collect();

    // Lazy source: items are built as workers claim them
    let item_counters = counters.clone();
    let source = (0..num_items).map(move |i| -> WorkItemRef {
        let counter = item_counters[i].clone();
        work_fn(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
    });

    let start = Instant::now();
    let pool = match Pool::start(
        PoolConfig::from_env()
            .source(source)
            .num_workers(num_workers),
    ) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to start pool: {}", e);
            std::process::exit(1);
        }
    };

    if !pool.wait_complete(Duration::from_secs(60)) {
        println!("Timeout! Pool did not complete");
        std::process::exit(1);
    }
    let elapsed = start.elapsed();

    // Exactly-once check
    let mut missed = 0usize;
    let mut duplicated = 0usize;
    for counter in &counters {
        match counter.load(Ordering::Relaxed) {
            1 => {}
            0 => missed += 1,
            _ => duplicated += 1,
        }
    }

    println!("\nDrain time: {:?}", elapsed);
    println!(
        "Throughput: {:.0} items/sec",
        num_items as f64 / elapsed.as_secs_f64()
    );
    println!("Missed: {}  Duplicated: {}", missed, duplicated);

    let failures = pool.take_failures();
    println!("Failures: {}", failures.len());
    pool.dispose();

    if missed > 0 || duplicated > 0 {
        std::process::exit(1);
    }
    println!("\n=== Stress Test Complete ===");
}
