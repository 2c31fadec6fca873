/*!
 * Setschedparam Benchmarks
 *
 * Uncontended and contended cost of the reference + lock + recompute path
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use thr_sched::core::limits::{SCHED_FIFO, SCHED_RR};
use thr_sched::{PriorityRangeTable, SchedParamControl, SchedPolicy, ThreadRegistry, ThreadScheduler};

fn scheduler() -> ThreadScheduler {
    let table: &'static PriorityRangeTable = Box::leak(Box::new(PriorityRangeTable::default()));
    ThreadScheduler::new(ThreadRegistry::with_table(table))
}

fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("setschedparam_uncontended");
    let sched = scheduler();
    let tid = sched.registry().register(SchedPolicy::Fifo, Some(10)).unwrap();

    group.bench_function("recompute", |b| {
        let mut priority = 0;
        b.iter(|| {
            priority = (priority + 1) % 32;
            sched
                .set_schedparam(black_box(tid), SCHED_RR, Some(priority))
                .unwrap();
        });
    });

    group.bench_function("same_priority", |b| {
        b.iter(|| {
            sched
                .set_schedparam(black_box(tid), SCHED_FIFO, Some(10))
                .unwrap();
        });
    });

    group.bench_function("invalid_policy", |b| {
        b.iter(|| {
            let _ = sched.set_schedparam(black_box(tid), 42, Some(10));
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("setschedparam_contended");

    for contenders in [1usize, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(contenders),
            &contenders,
            |b, &contenders| {
                let sched = scheduler();
                let tid = sched.registry().register(SchedPolicy::Fifo, Some(10)).unwrap();
                let stop = Arc::new(AtomicBool::new(false));

                let background: Vec<_> = (0..contenders)
                    .map(|i| {
                        let sched = sched.clone();
                        let stop = stop.clone();
                        thread::spawn(move || {
                            while !stop.load(Ordering::Relaxed) {
                                let _ = sched.set_schedparam(tid, SCHED_FIFO, Some(i as i32));
                            }
                        })
                    })
                    .collect();

                b.iter(|| {
                    sched
                        .set_schedparam(black_box(tid), SCHED_RR, Some(20))
                        .unwrap();
                });

                stop.store(true, Ordering::Relaxed);
                for handle in background {
                    handle.join().unwrap();
                }
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended, bench_contended);
criterion_main!(benches);
