use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use drainpool::{work_fn, Pool, PoolConfig, WorkItemRef};
use std::time::Duration;

const TOTAL_ITEMS: usize = 10_000;

/// Measure draining TOTAL_ITEMS no-op items with varying worker counts
fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    for num_workers in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("workers", num_workers),
            &num_workers,
            |b, &num_workers| {
                b.iter(|| {
                    let source =
                        (0..TOTAL_ITEMS).map(|_| -> WorkItemRef { work_fn(|| Ok(())) });
                    let pool = Pool::start(
                        PoolConfig::from_env()
                            .source(source)
                            .num_workers(num_workers),
                    )
                    .unwrap();
                    assert!(pool.wait_complete(Duration::from_secs(30)));
                    pool.dispose();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_drain);
criterion_main!(benches);
