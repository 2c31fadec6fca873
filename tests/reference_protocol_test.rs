/*!
 * Reference Protocol Tests
 * Reference counting, reclamation and the death-before-lock race
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use thr_sched::core::guard::{Guard, GuardRef};
use thr_sched::core::limits::SCHED_FIFO;
use thr_sched::{
    PriorityRangeTable, SchedError, SchedParamControl, SchedPolicy, ThreadRegistry,
    ThreadScheduler, ThreadState,
};

fn setup() -> (ThreadScheduler, Arc<ThreadRegistry>) {
    let table: &'static PriorityRangeTable = Box::leak(Box::new(PriorityRangeTable::default()));
    let registry = ThreadRegistry::with_table(table);
    (ThreadScheduler::new(registry.clone()), registry)
}

/// Spin until the handle's reference count reaches `refs`
fn wait_for_refs(registry: &ThreadRegistry, tid: u64, refs: usize) {
    while registry.ref_count(tid) != Some(refs) {
        thread::yield_now();
    }
}

#[test]
fn test_thread_dies_between_reference_and_lock() {
    let (sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Fifo, Some(10)).unwrap();

    // The exiting thread holds its own scheduling lock
    let owner = registry.acquire(tid, false).unwrap();
    let mut owner_lock = owner.lock_sched().unwrap();

    let caller = {
        let sched = sched.clone();
        thread::spawn(move || sched.set_schedparam(tid, SCHED_FIFO, Some(20)))
    };

    // Caller has taken its reference and is now waiting on the lock
    wait_for_refs(&registry, tid, 2);

    owner_lock.mark_dead();
    drop(owner_lock);
    drop(owner);

    assert_eq!(caller.join().unwrap(), Err(SchedError::NoSuchThread(tid)));

    // Whichever release came last reclaimed the handle
    assert!(!registry.contains(tid));
    assert_eq!(registry.reclaimed_count(), 1);
    assert_eq!(sched.stats().no_such_thread, 1);
}

#[test]
fn test_dead_thread_fields_untouched() {
    let (sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Fifo, Some(10)).unwrap();
    let observer = registry.acquire(tid, false).unwrap();
    registry.mark_dead(tid).unwrap();

    assert!(sched.set_schedparam(tid, SCHED_FIFO, Some(20)).is_err());

    let fields = observer.lock_sched().unwrap();
    assert_eq!(fields.state(), ThreadState::Dead);
    assert_eq!(fields.base_priority(), 10);
    assert_eq!(fields.policy(), SchedPolicy::Fifo);
}

#[test]
fn test_reference_count_conserved_across_outcomes() {
    let (sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Fifo, Some(10)).unwrap();
    let held = registry.acquire(tid, false).unwrap();
    assert_eq!(held.ref_count(), 1);

    let calls = [
        (SCHED_FIFO, Some(12)),
        (SCHED_FIFO, Some(12)),
        (SCHED_FIFO, None),
        (77, Some(1)),
        (SCHED_FIFO, Some(1000)),
    ];
    for (policy, priority) in calls {
        let _ = sched.set_schedparam(tid, policy, priority);
        assert_eq!(registry.ref_count(tid), Some(1));
    }

    registry.mark_dead(tid).unwrap();
    assert!(sched.set_schedparam(tid, SCHED_FIFO, Some(3)).is_err());
    assert_eq!(registry.ref_count(tid), Some(1));
}

#[test]
fn test_include_dead_acquire() {
    let (_sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Other, None).unwrap();
    let keep = registry.acquire(tid, false).unwrap();
    registry.mark_dead(tid).unwrap();

    assert_eq!(
        registry.acquire(tid, false).unwrap_err(),
        SchedError::NoSuchThread(tid)
    );

    let dead = registry.acquire(tid, true).unwrap();
    assert_eq!(dead.state(), ThreadState::Dead);
    assert_eq!(dead.ref_count(), 2);

    drop(keep);
    assert!(registry.contains(tid));
    drop(dead);
    assert!(!registry.contains(tid));
}

#[test]
fn test_explicit_release_reclaims() {
    let (_sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Other, None).unwrap();
    let mut thread = registry.acquire(tid, false).unwrap();
    registry.mark_dead(tid).unwrap();

    assert!(thread.is_active());
    thread.release().unwrap();
    assert!(!thread.is_active());
    assert!(!registry.contains(tid));

    // Drop after explicit release must not release again
    drop(thread);
    assert_eq!(registry.reclaimed_count(), 1);
}

#[test]
fn test_clone_takes_own_reference() {
    let (_sched, registry) = setup();
    let tid = registry.register(SchedPolicy::Other, None).unwrap();
    let first = registry.acquire(tid, false).unwrap();
    assert!(first.is_last_ref());

    let second = first.clone();
    assert_eq!(registry.ref_count(tid), Some(2));
    assert!(!second.is_last_ref());

    drop(first);
    assert!(second.is_last_ref());
    drop(second);
    assert_eq!(registry.ref_count(tid), Some(0));
}
